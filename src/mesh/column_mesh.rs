//! Column-structured unstructured mesh and its advection coefficients.
//!
//! The horizontal mesh is a set of polygonal cells joined by edges. Every
//! cell is the top of a column of layers; layer `k` of cell `c` exists iff
//! `k < max_level(c)`, so partial columns (shallow cells, partial bottom
//! cells) are expressed by a per-cell bottom index.
//!
//! Each edge stores its reconstruction stencil: the cells whose means
//! enter the high-order face value together with the centred (4th-order)
//! and upwind-biased (3rd-order correction) weights. Generating these
//! weights for an arbitrary mesh is the job of the mesh tooling; this
//! module only stores them and checks them for consistency.

use thiserror::Error;

use crate::flux::AdvectionOrder;
use crate::types::{CellIndex, EdgeIndex};

/// Consistency errors in a [`ColumnMesh`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A cell lists an edge that does not exist.
    #[error("cell {cell} references missing edge {edge}")]
    InvalidEdgeReference { cell: CellIndex, edge: EdgeIndex },

    /// An edge or stencil lists a cell that does not exist.
    #[error("edge {edge} references missing cell {cell}")]
    InvalidCellReference { edge: EdgeIndex, cell: CellIndex },

    /// Orientation sign on a cell disagrees with the edge's left/right cells.
    #[error("cell {cell} has sign {sign} on edge {edge}, expected {expected}")]
    EdgeSignMismatch {
        cell: CellIndex,
        edge: EdgeIndex,
        sign: f64,
        expected: f64,
    },

    /// Stencil cell list and weight lists have different lengths.
    #[error(
        "edge {edge} stencil has {cells} cells but {centered} centred and {upwind} upwind weights"
    )]
    StencilLengthMismatch {
        edge: EdgeIndex,
        cells: usize,
        centered: usize,
        upwind: usize,
    },

    /// Weights would not reproduce a constant field.
    #[error("edge {edge} weights sum to {centered_sum} (centred) and {upwind_sum} (upwind)")]
    InconsistentWeights {
        edge: EdgeIndex,
        centered_sum: f64,
        upwind_sum: f64,
    },

    /// A wide stencil was declared without any cells.
    #[error("edge {edge} declares {order} support but has an empty stencil")]
    EmptyStencil { edge: EdgeIndex, order: AdvectionOrder },

    /// Bottom index deeper than the mesh.
    #[error("cell {cell} has max_level {max_level} but the mesh has {n_layers} layers")]
    MaxLevelExceedsLayers {
        cell: CellIndex,
        max_level: usize,
        n_layers: usize,
    },

    /// Cell area must be positive.
    #[error("cell {cell} has non-positive area {area}")]
    NonPositiveArea { cell: CellIndex, area: f64 },
}

/// One edge of a cell together with its orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeOnCell {
    /// The edge
    pub edge: EdgeIndex,
    /// +1 if a positive canonical edge flux enters the cell, -1 if it leaves
    pub sign: f64,
}

/// A mesh column.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Bounding edges in order, with orientation signs
    pub edges: Vec<EdgeOnCell>,
    /// Horizontal area (m²)
    pub area: f64,
    /// Number of active layers; layers `max_level..` lie below the seafloor
    pub max_level: usize,
    /// 0 for cells owned by this partition, n for the n-th halo ring
    pub halo_level: u8,
}

impl Cell {
    /// Whether the tendency of this cell is computed here.
    #[inline]
    pub fn is_owned(&self) -> bool {
        self.halo_level == 0
    }

    /// Whether layer `k` exists in this column.
    #[inline]
    pub fn is_active(&self, k: usize) -> bool {
        k < self.max_level
    }
}

/// Reconstruction stencil of one edge.
///
/// The face value on the edge is `Σ centered[j]·φ[cells[j]]` (4th order),
/// plus `β·sign(uh)·Σ upwind[j]·φ[cells[j]]` for the blended 3rd-order
/// scheme. Second order uses only the two cells of the edge and ignores
/// the stencil.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStencil {
    /// Cells contributing to the face value
    pub cells: Vec<CellIndex>,
    /// Centred weights (sum to one)
    pub centered: Vec<f64>,
    /// Upwind-biased correction weights (sum to zero)
    pub upwind: Vec<f64>,
    /// Highest order the stencil supports
    pub supported_order: AdvectionOrder,
}

impl EdgeStencil {
    /// Full-order stencil.
    pub fn new(cells: Vec<CellIndex>, centered: Vec<f64>, upwind: Vec<f64>) -> Self {
        Self {
            cells,
            centered,
            upwind,
            supported_order: AdvectionOrder::Fourth,
        }
    }

    /// Stencil for an edge without enough neighbours for high order.
    pub fn second_order_only() -> Self {
        Self {
            cells: Vec::new(),
            centered: Vec::new(),
            upwind: Vec::new(),
            supported_order: AdvectionOrder::Second,
        }
    }

    /// Restrict the orders this stencil may be used for.
    pub fn with_supported_order(mut self, order: AdvectionOrder) -> Self {
        self.supported_order = order;
        self
    }

    /// Number of cells in the stencil.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the stencil has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Highest order not exceeding `configured` that this stencil supports.
    #[inline]
    pub fn effective_order(&self, configured: AdvectionOrder) -> AdvectionOrder {
        configured.min(self.supported_order)
    }
}

/// A horizontal edge.
#[derive(Clone, Debug)]
pub struct Edge {
    /// Cell the canonical normal points away from (always present)
    pub left: CellIndex,
    /// Cell the canonical normal points into (`None` for closed boundary edges)
    pub right: Option<CellIndex>,
    /// Edge length multiplying the thickness-weighted normal velocity (m)
    pub dv_edge: f64,
    /// High-order reconstruction stencil
    pub stencil: EdgeStencil,
}

impl Edge {
    /// Check if this is a closed boundary edge.
    pub fn is_boundary(&self) -> bool {
        self.right.is_none()
    }

    /// Check if this is an interior edge.
    pub fn is_interior(&self) -> bool {
        self.right.is_some()
    }

    /// The cell on the other side of the edge from `cell`.
    pub fn other(&self, cell: CellIndex) -> Option<CellIndex> {
        match self.right {
            Some(right) if cell == self.left => Some(right),
            Some(_) => Some(self.left),
            None => None,
        }
    }
}

/// Layered unstructured mesh with precomputed advection stencils.
#[derive(Clone, Debug)]
pub struct ColumnMesh {
    /// Cells (columns)
    pub cells: Vec<Cell>,
    /// Horizontal edges
    pub edges: Vec<Edge>,
    /// Number of layers in the deepest column
    pub n_layers: usize,
}

impl ColumnMesh {
    /// Assemble a mesh from its parts.
    ///
    /// The result is not validated; call [`ColumnMesh::validate`] on
    /// meshes that come from outside the crate.
    pub fn new(cells: Vec<Cell>, edges: Vec<Edge>, n_layers: usize) -> Self {
        Self {
            cells,
            edges,
            n_layers,
        }
    }

    /// Number of cells, including halo cells.
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of edges.
    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of layer interfaces per column (`n_layers + 1`).
    #[inline]
    pub fn n_interfaces(&self) -> usize {
        self.n_layers + 1
    }

    #[inline]
    pub fn cell(&self, c: CellIndex) -> &Cell {
        &self.cells[c]
    }

    #[inline]
    pub fn edge(&self, e: EdgeIndex) -> &Edge {
        &self.edges[e]
    }

    /// Bottom index of a column.
    #[inline]
    pub fn max_level(&self, c: CellIndex) -> usize {
        self.cells[c].max_level
    }

    /// Number of layers in which the edge carries flux.
    ///
    /// This is the shallower of the two adjoining columns; closed boundary
    /// edges carry no flux at all.
    #[inline]
    pub fn edge_max_level(&self, e: EdgeIndex) -> usize {
        let edge = &self.edges[e];
        match edge.right {
            Some(right) => self.max_level(edge.left).min(self.max_level(right)),
            None => 0,
        }
    }

    /// Whether every stencil cell of `e` has layer `k`.
    #[inline]
    pub fn stencil_active_at(&self, e: EdgeIndex, k: usize) -> bool {
        self.edges[e]
            .stencil
            .cells
            .iter()
            .all(|&c| self.cells[c].is_active(k))
    }

    /// Iterator over the cells owned by this partition.
    pub fn owned_cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        CellIndex::iter(self.n_cells()).filter(|&c| self.cells[c].is_owned())
    }

    /// Deepest halo ring present in the mesh.
    pub fn halo_depth(&self) -> u8 {
        self.cells.iter().map(|c| c.halo_level).max().unwrap_or(0)
    }

    /// Replace the bottom index of every column.
    ///
    /// # Panics
    ///
    /// Panics if `levels` does not have one entry per cell.
    pub fn with_max_levels(mut self, levels: &[usize]) -> Self {
        assert_eq!(
            levels.len(),
            self.n_cells(),
            "expected one bottom index per cell"
        );
        for (cell, &level) in self.cells.iter_mut().zip(levels) {
            cell.max_level = level;
        }
        self
    }

    /// Replace the halo level of every cell.
    ///
    /// # Panics
    ///
    /// Panics if `levels` does not have one entry per cell.
    pub fn with_halo_levels(mut self, levels: &[u8]) -> Self {
        assert_eq!(levels.len(), self.n_cells(), "expected one halo level per cell");
        for (cell, &level) in self.cells.iter_mut().zip(levels) {
            cell.halo_level = level;
        }
        self
    }

    /// Check connectivity, orientation and stencil consistency.
    pub fn validate(&self) -> Result<(), MeshError> {
        const WEIGHT_TOL: f64 = 1e-10;
        let n_cells = self.n_cells();

        for (c, cell) in self.cells.iter().enumerate() {
            let cell_idx = CellIndex::new(c);
            if !(cell.area > 0.0) {
                return Err(MeshError::NonPositiveArea {
                    cell: cell_idx,
                    area: cell.area,
                });
            }
            if cell.max_level > self.n_layers {
                return Err(MeshError::MaxLevelExceedsLayers {
                    cell: cell_idx,
                    max_level: cell.max_level,
                    n_layers: self.n_layers,
                });
            }
            for on_cell in &cell.edges {
                let Some(edge) = self.edges.get(on_cell.edge.get()) else {
                    return Err(MeshError::InvalidEdgeReference {
                        cell: cell_idx,
                        edge: on_cell.edge,
                    });
                };
                let expected = if edge.left == cell_idx {
                    -1.0
                } else if edge.right == Some(cell_idx) {
                    1.0
                } else {
                    return Err(MeshError::InvalidEdgeReference {
                        cell: cell_idx,
                        edge: on_cell.edge,
                    });
                };
                if on_cell.sign != expected {
                    return Err(MeshError::EdgeSignMismatch {
                        cell: cell_idx,
                        edge: on_cell.edge,
                        sign: on_cell.sign,
                        expected,
                    });
                }
            }
        }

        for (e, edge) in self.edges.iter().enumerate() {
            let edge_idx = EdgeIndex::new(e);
            let referenced = std::iter::once(edge.left)
                .chain(edge.right)
                .chain(edge.stencil.cells.iter().copied());
            for cell in referenced {
                if cell.get() >= n_cells {
                    return Err(MeshError::InvalidCellReference {
                        edge: edge_idx,
                        cell,
                    });
                }
            }

            let stencil = &edge.stencil;
            if stencil.centered.len() != stencil.len() || stencil.upwind.len() != stencil.len() {
                return Err(MeshError::StencilLengthMismatch {
                    edge: edge_idx,
                    cells: stencil.len(),
                    centered: stencil.centered.len(),
                    upwind: stencil.upwind.len(),
                });
            }
            if stencil.supported_order.needs_wide_stencil() {
                if stencil.is_empty() {
                    return Err(MeshError::EmptyStencil {
                        edge: edge_idx,
                        order: stencil.supported_order,
                    });
                }
                let centered_sum: f64 = stencil.centered.iter().sum();
                let upwind_sum: f64 = stencil.upwind.iter().sum();
                if (centered_sum - 1.0).abs() > WEIGHT_TOL || upwind_sum.abs() > WEIGHT_TOL {
                    return Err(MeshError::InconsistentWeights {
                        edge: edge_idx,
                        centered_sum,
                        upwind_sum,
                    });
                }
            }
        }

        Ok(())
    }
}
