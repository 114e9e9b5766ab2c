//! High-order (unlimited) advective fluxes.
//!
//! Horizontal face values come from the per-edge stencils stored on the
//! mesh; vertical face values from the four-point formulas in
//! [`reconstruction`](super::reconstruction) applied along the column.
//!
//! Orders are reduced silently where the data does not support them:
//! an edge never exceeds its stencil's supported order, an edge whose
//! stencil touches a column that is too shallow uses second order in the
//! affected layers, and interfaces whose four-point stencil would leave the
//! active column use the thickness-weighted second-order value.

use crate::mesh::ColumnMesh;
use crate::solver::config::ReconstructionParams;
use crate::solver::state::{AdvectionInputs, CellField, EdgeField, TracerView};
use crate::types::{CellIndex, EdgeIndex};

use super::flux_set::FluxSet;
use super::reconstruction::{
    AdvectionOrder, flow_direction, second_order_face_value, third_order_face_value,
    thickness_weighted_face_value,
};

/// Tracer value at edge `e` in layer `k`.
///
/// `uh` is only used for the direction of the 3rd-order correction.
/// Must not be called for closed boundary edges.
pub fn edge_face_value(
    mesh: &ColumnMesh,
    e: EdgeIndex,
    tracer: TracerView<'_>,
    k: usize,
    order: AdvectionOrder,
    coef_3rd_order: f64,
    uh: f64,
) -> f64 {
    let edge = mesh.edge(e);
    let stencil = &edge.stencil;

    let mut order = stencil.effective_order(order);
    if order != AdvectionOrder::Second && !mesh.stencil_active_at(e, k) {
        order = AdvectionOrder::Second;
    }

    match order {
        AdvectionOrder::Second => {
            let right = edge.right.unwrap_or(edge.left);
            second_order_face_value(tracer.get(edge.left, k), tracer.get(right, k))
        }
        AdvectionOrder::Fourth => weighted_sum(&stencil.cells, &stencil.centered, tracer, k),
        AdvectionOrder::Third => {
            weighted_sum(&stencil.cells, &stencil.centered, tracer, k)
                + coef_3rd_order
                    * flow_direction(uh)
                    * weighted_sum(&stencil.cells, &stencil.upwind, tracer, k)
        }
    }
}

#[inline]
fn weighted_sum(
    cells: &[CellIndex],
    weights: &[f64],
    tracer: TracerView<'_>,
    k: usize,
) -> f64 {
    cells
        .iter()
        .zip(weights)
        .map(|(&c, &w)| w * tracer.get(c, k))
        .sum()
}

/// High-order flux across every edge and layer.
pub fn horizontal_high_order_fluxes(
    mesh: &ColumnMesh,
    tracer: TracerView<'_>,
    normal_thickness_flux: &EdgeField,
    order: AdvectionOrder,
    coef_3rd_order: f64,
    out: &mut EdgeField,
) {
    out.fill_columns(|e, fluxes| {
        fluxes.fill(0.0);
        let edge = mesh.edge(e);
        if edge.is_boundary() {
            return;
        }
        let n_active = mesh.edge_max_level(e);
        for (k, flux) in fluxes.iter_mut().enumerate().take(n_active) {
            let uh = normal_thickness_flux.get(e, k);
            let face = edge_face_value(mesh, e, tracer, k, order, coef_3rd_order, uh);
            *flux = edge.dv_edge * uh * face;
        }
    });
}

/// High-order volumetric flux (`area · w_up · φ_face`) through every
/// interior layer interface, positive up.
pub fn vertical_high_order_fluxes(
    mesh: &ColumnMesh,
    tracer: TracerView<'_>,
    vertical_velocity: &CellField,
    layer_thickness: &CellField,
    order: AdvectionOrder,
    coef_3rd_order: f64,
    w_to_upward: f64,
    out: &mut CellField,
) {
    out.fill_columns(|c, fluxes| {
        fluxes.fill(0.0);
        let m = mesh.max_level(c);
        let area = mesh.cell(c).area;
        let phi = tracer.column(c);
        let h = layer_thickness.column(c);
        let w = vertical_velocity.column(c);

        for k in 1..m {
            let w_up = w_to_upward * w[k];
            let wide = order != AdvectionOrder::Second && k >= 2 && k + 1 < m;
            let face = if !wide {
                thickness_weighted_face_value(phi[k - 1], phi[k], h[k - 1], h[k])
            } else {
                // Points ordered top to bottom; the formula's "forward"
                // direction is therefore downward
                let coef = match order {
                    AdvectionOrder::Third => coef_3rd_order,
                    _ => 0.0,
                };
                third_order_face_value(
                    phi[k - 2],
                    phi[k - 1],
                    phi[k],
                    phi[k + 1],
                    -flow_direction(w_up),
                    coef,
                )
            };
            fluxes[k] = area * w_up * face;
        }
    });
}

/// High-order fluxes of one tracer in both directions.
pub fn high_order_fluxes(
    mesh: &ColumnMesh,
    tracer: TracerView<'_>,
    inputs: &AdvectionInputs<'_>,
    params: &ReconstructionParams,
) -> FluxSet {
    let mut fluxes = FluxSet::zeros(mesh);
    horizontal_high_order_fluxes(
        mesh,
        tracer,
        inputs.normal_thickness_flux,
        params.horizontal_order,
        params.coef_3rd_order,
        &mut fluxes.horizontal,
    );
    vertical_high_order_fluxes(
        mesh,
        tracer,
        inputs.vertical_velocity,
        inputs.layer_thickness,
        params.vertical_order,
        params.coef_3rd_order,
        params.w_to_upward,
        &mut fluxes.vertical,
    );
    fluxes
}
