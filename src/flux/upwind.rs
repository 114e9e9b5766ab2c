//! Donor-cell (first-order upwind) fluxes.
//!
//! The tracer value carried across a face is the one of the upstream
//! control volume:
//!
//! ```text
//! F = U · φ_left   if U > 0
//! F = U · φ_right  otherwise
//! ```
//!
//! where `U` is the volume transport across the face: `dv_edge · uh`
//! horizontally, `area · w_up` vertically.
//!
//! This flux cannot create new extrema and is the target the FCT limiter
//! falls back to.

use crate::mesh::ColumnMesh;
use crate::solver::state::{AdvectionInputs, CellField, EdgeField, TracerView};

use super::flux_set::FluxSet;
use super::reconstruction::upwind_value;

/// Donor-cell flux across every edge and layer.
///
/// Layers below the shallower of the two adjoining columns, and closed
/// boundary edges, get zero flux.
pub fn horizontal_upwind_fluxes(
    mesh: &ColumnMesh,
    tracer: TracerView<'_>,
    normal_thickness_flux: &EdgeField,
    out: &mut EdgeField,
) {
    out.fill_columns(|e, fluxes| {
        fluxes.fill(0.0);
        let edge = mesh.edge(e);
        let Some(right) = edge.right else {
            return;
        };
        let n_active = mesh.edge_max_level(e);
        for (k, flux) in fluxes.iter_mut().enumerate().take(n_active) {
            let uh = normal_thickness_flux.get(e, k);
            let donor = upwind_value(tracer.get(edge.left, k), tracer.get(right, k), uh);
            *flux = edge.dv_edge * uh * donor;
        }
    });
}

/// Donor-cell flux through every interior layer interface.
///
/// The flux is volumetric (`area · w_up · φ`). `w_to_upward` converts the
/// supplied vertical velocity to upward velocity. Surface and seafloor
/// interfaces get zero flux.
pub fn vertical_upwind_fluxes(
    mesh: &ColumnMesh,
    tracer: TracerView<'_>,
    vertical_velocity: &CellField,
    w_to_upward: f64,
    out: &mut CellField,
) {
    out.fill_columns(|c, fluxes| {
        fluxes.fill(0.0);
        let area = mesh.cell(c).area;
        let phi = tracer.column(c);
        let w = vertical_velocity.column(c);
        for k in 1..mesh.max_level(c) {
            let w_up = w_to_upward * w[k];
            // Upward flow carries the layer below (k) into the one above (k - 1)
            fluxes[k] = area * w_up * upwind_value(phi[k], phi[k - 1], w_up);
        }
    });
}

/// Donor-cell fluxes of one tracer in both directions.
pub fn low_order_fluxes(
    mesh: &ColumnMesh,
    tracer: TracerView<'_>,
    inputs: &AdvectionInputs<'_>,
    w_to_upward: f64,
) -> FluxSet {
    let mut fluxes = FluxSet::zeros(mesh);
    horizontal_upwind_fluxes(
        mesh,
        tracer,
        inputs.normal_thickness_flux,
        &mut fluxes.horizontal,
    );
    vertical_upwind_fluxes(
        mesh,
        tracer,
        inputs.vertical_velocity,
        w_to_upward,
        &mut fluxes.vertical,
    );
    fluxes
}
