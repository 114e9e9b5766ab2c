//! Mesh representation.
//!
//! Provides the geometry/coefficient store consumed by the advection
//! kernel:
//! - Column-structured unstructured mesh with per-cell bottom index
//! - Per-edge reconstruction stencils and orientation signs
//! - Halo ring metadata for partitioned meshes
//! - Small structured builders (ring, channel, periodic grid)

mod builders;
mod column_mesh;

pub use column_mesh::{Cell, ColumnMesh, Edge, EdgeOnCell, EdgeStencil, MeshError};
