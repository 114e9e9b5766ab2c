//! Strongly-typed index types.
//!
//! Cells, edges and tracers are all addressed by `usize` underneath; the
//! newtypes here make the mesh connectivity and field accessors
//! self-documenting and stop a cell id from being used as an edge id.
//!
//! ```
//! use tracer_advection::types::{CellIndex, EdgeIndex};
//!
//! let c = CellIndex::new(3);
//! let e = EdgeIndex::new(3);
//! assert_eq!(c.get(), e.get());
//! assert_ne!(format!("{c}"), format!("{e}"));
//! ```

mod indices;

pub use indices::{CellIndex, EdgeIndex, TracerIndex};
