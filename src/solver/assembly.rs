//! Flux-divergence assembly into tracer tendencies.
//!
//! For owned cell `c` and active layer `k`:
//!
//! ```text
//! tendency[c,k] += (Σ_e sign(c,e)·F_h[e,k] + F_v[c,k+1] − F_v[c,k]) / (area_c · h[c,k])
//! ```
//!
//! Every canonical flux enters the two control volumes it separates with
//! opposite signs, so the volume-weighted sum of the tendency over a closed
//! domain vanishes up to round-off.

use crate::flux::FluxSet;
use crate::mesh::ColumnMesh;
use crate::solver::state::CellField;
use crate::types::CellIndex;

/// Net tracer inflow into control volume `(c, k)` (tracer · m³/s).
#[inline]
pub fn net_inflow(mesh: &ColumnMesh, fluxes: &FluxSet, c: CellIndex, k: usize) -> f64 {
    let horizontal: f64 = mesh
        .cell(c)
        .edges
        .iter()
        .map(|eoc| eoc.sign * fluxes.horizontal.get(eoc.edge, k))
        .sum();
    horizontal + fluxes.vertical.get(c, k + 1) - fluxes.vertical.get(c, k)
}

/// Volume of control volume `(c, k)`.
#[inline]
pub fn control_volume(mesh: &ColumnMesh, layer_thickness: &CellField, c: CellIndex, k: usize) -> f64 {
    mesh.cell(c).area * layer_thickness.get(c, k)
}

/// Add the flux divergence of one tracer to its tendency block.
///
/// `tendency` is the tracer's cell-major block (`n_cells × n_layers`).
/// Halo cells and layers at or below a column's bottom index are left
/// untouched.
pub fn accumulate_tendency(
    mesh: &ColumnMesh,
    fluxes: &FluxSet,
    layer_thickness: &CellField,
    tendency: &mut [f64],
) {
    let n_layers = mesh.n_layers;
    debug_assert_eq!(tendency.len(), mesh.n_cells() * n_layers);
    if n_layers == 0 {
        return;
    }

    let assemble_column = |(col, column): (usize, &mut [f64])| {
        let c = CellIndex::new(col);
        if !mesh.cell(c).is_owned() {
            return;
        }
        for (k, value) in column.iter_mut().enumerate().take(mesh.max_level(c)) {
            *value += net_inflow(mesh, fluxes, c, k) / control_volume(mesh, layer_thickness, c, k);
        }
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        tendency
            .par_chunks_mut(n_layers)
            .enumerate()
            .for_each(assemble_column);
    }

    #[cfg(not(feature = "parallel"))]
    {
        tendency
            .chunks_mut(n_layers)
            .enumerate()
            .for_each(assemble_column);
    }
}
