//! Intermediate flux buffers.

use crate::mesh::ColumnMesh;
use crate::solver::state::{CellField, EdgeField};

/// Canonical advective fluxes of one tracer.
///
/// Each edge/interface flux is stored exactly once and applied with
/// opposite signs to the two control volumes it separates.
///
/// - `horizontal[e, k]`: tracer transport across edge `e` in layer `k`,
///   positive from the edge's left cell to its right cell.
/// - `vertical[c, k]`: tracer transport through interface `k` of column
///   `c` (the top of layer `k`), positive upwards. Interface 0 is the sea
///   surface and interface `max_level` the seafloor; both stay zero.
///
/// Both are volumetric (tracer · m³/s).
#[derive(Clone, Debug, PartialEq)]
pub struct FluxSet {
    pub horizontal: EdgeField,
    pub vertical: CellField,
}

impl FluxSet {
    /// Zero fluxes shaped for `mesh`.
    pub fn zeros(mesh: &ColumnMesh) -> Self {
        Self {
            horizontal: EdgeField::new(mesh.n_edges(), mesh.n_layers),
            vertical: CellField::new(mesh.n_cells(), mesh.n_interfaces()),
        }
    }

    /// Elementwise `self - other`.
    pub fn difference(&self, other: &FluxSet) -> FluxSet {
        FluxSet {
            horizontal: self.horizontal.difference(&other.horizontal),
            vertical: self.vertical.difference(&other.vertical),
        }
    }
}
