//! Small structured meshes with closed-form advection stencils.
//!
//! These produce [`ColumnMesh`] values for tests, benches and quick
//! experiments. Along each edge normal the cells form a straight line of
//! equal spacing, so the stencil weights are the 1-D four-point formulas
//! ([`FOURTH_ORDER_WEIGHTS`], [`THIRD_ORDER_CORRECTION_WEIGHTS`]).

use crate::flux::{FOURTH_ORDER_WEIGHTS, THIRD_ORDER_CORRECTION_WEIGHTS};
use crate::types::{CellIndex, EdgeIndex};

use super::column_mesh::{Cell, ColumnMesh, Edge, EdgeOnCell, EdgeStencil};

/// Collects edges and hooks them up to their cells with orientation signs.
struct MeshAssembler {
    cells: Vec<Cell>,
    edges: Vec<Edge>,
}

impl MeshAssembler {
    fn new(n_cells: usize, area: f64, n_layers: usize) -> Self {
        Self {
            cells: vec![
                Cell {
                    edges: Vec::new(),
                    area,
                    max_level: n_layers,
                    halo_level: 0,
                };
                n_cells
            ],
            edges: Vec::new(),
        }
    }

    fn add_edge(
        &mut self,
        left: CellIndex,
        right: Option<CellIndex>,
        dv_edge: f64,
        stencil: EdgeStencil,
    ) {
        let edge = EdgeIndex::new(self.edges.len());
        self.cells[left].edges.push(EdgeOnCell { edge, sign: -1.0 });
        if let Some(right) = right {
            self.cells[right].edges.push(EdgeOnCell { edge, sign: 1.0 });
        }
        self.edges.push(Edge {
            left,
            right,
            dv_edge,
            stencil,
        });
    }

    fn finish(self, n_layers: usize) -> ColumnMesh {
        ColumnMesh::new(self.cells, self.edges, n_layers)
    }
}

/// Four-point stencil `[i-1, i, i+1, i+2]` for the face between `i` and `i+1`.
fn line_stencil(cells: [usize; 4]) -> EdgeStencil {
    EdgeStencil::new(
        cells.iter().map(|&c| CellIndex::new(c)).collect(),
        FOURTH_ORDER_WEIGHTS.to_vec(),
        THIRD_ORDER_CORRECTION_WEIGHTS.to_vec(),
    )
}

impl ColumnMesh {
    /// Periodic 1-D ring of `n_cells` columns of width `dx` and unit breadth.
    ///
    /// Edge `i` joins cell `i` (left) to cell `i+1 mod n` (right), so a
    /// positive normal flux moves tracer towards increasing cell index.
    ///
    /// # Panics
    ///
    /// Panics if `n_cells < 3` or `dx` is not positive.
    pub fn periodic_ring(n_cells: usize, dx: f64, n_layers: usize) -> Self {
        assert!(n_cells >= 3, "a periodic ring needs at least 3 cells");
        assert!(dx > 0.0, "cell width must be positive");

        let mut assembler = MeshAssembler::new(n_cells, dx, n_layers);
        for i in 0..n_cells {
            let im1 = (i + n_cells - 1) % n_cells;
            let ip1 = (i + 1) % n_cells;
            let ip2 = (i + 2) % n_cells;
            assembler.add_edge(
                CellIndex::new(i),
                Some(CellIndex::new(ip1)),
                1.0,
                line_stencil([im1, i, ip1, ip2]),
            );
        }
        assembler.finish(n_layers)
    }

    /// Closed 1-D channel of `n_cells` columns with walls at both ends.
    ///
    /// Edge 0 is the western wall, edges `1..n_cells` are interior (edge
    /// `i` joins cell `i-1` to cell `i`) and the last edge is the eastern
    /// wall. The interior edges next to the walls lack the wide stencil and
    /// only support second order.
    ///
    /// # Panics
    ///
    /// Panics if `n_cells < 2` or `dx` is not positive.
    pub fn closed_channel(n_cells: usize, dx: f64, n_layers: usize) -> Self {
        assert!(n_cells >= 2, "a channel needs at least 2 cells");
        assert!(dx > 0.0, "cell width must be positive");

        let mut assembler = MeshAssembler::new(n_cells, dx, n_layers);
        assembler.add_edge(CellIndex::new(0), None, 1.0, EdgeStencil::second_order_only());
        for i in 1..n_cells {
            let stencil = if i >= 2 && i + 1 < n_cells {
                line_stencil([i - 2, i - 1, i, i + 1])
            } else {
                EdgeStencil::second_order_only()
            };
            assembler.add_edge(
                CellIndex::new(i - 1),
                Some(CellIndex::new(i)),
                1.0,
                stencil,
            );
        }
        assembler.add_edge(
            CellIndex::new(n_cells - 1),
            None,
            1.0,
            EdgeStencil::second_order_only(),
        );
        assembler.finish(n_layers)
    }

    /// Doubly periodic grid of `nx × ny` square columns of side `dx`.
    ///
    /// Cell `(i, j)` has index `j·nx + i`. The first `nx·ny` edges face
    /// east (left cell `(i, j)`, right cell `(i+1, j)`), the next `nx·ny`
    /// face north (left `(i, j)`, right `(i, j+1)`).
    ///
    /// # Panics
    ///
    /// Panics if `nx < 3`, `ny < 3` or `dx` is not positive.
    pub fn periodic_grid(nx: usize, ny: usize, dx: f64, n_layers: usize) -> Self {
        assert!(nx >= 3 && ny >= 3, "a periodic grid needs at least 3x3 cells");
        assert!(dx > 0.0, "cell size must be positive");

        let id = |i: usize, j: usize| (j % ny) * nx + (i % nx);
        let mut assembler = MeshAssembler::new(nx * ny, dx * dx, n_layers);

        for j in 0..ny {
            for i in 0..nx {
                assembler.add_edge(
                    CellIndex::new(id(i, j)),
                    Some(CellIndex::new(id(i + 1, j))),
                    dx,
                    line_stencil([id(i + nx - 1, j), id(i, j), id(i + 1, j), id(i + 2, j)]),
                );
            }
        }
        for j in 0..ny {
            for i in 0..nx {
                assembler.add_edge(
                    CellIndex::new(id(i, j)),
                    Some(CellIndex::new(id(i, j + 1))),
                    dx,
                    line_stencil([id(i, j + ny - 1), id(i, j), id(i, j + 1), id(i, j + 2)]),
                );
            }
        }
        assembler.finish(n_layers)
    }
}
