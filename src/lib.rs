//! # tracer-advection
//!
//! Tracer advection tendencies for a layered ocean model on an
//! unstructured horizontal mesh.
//!
//! This crate provides:
//! - A column mesh with per-edge reconstruction stencils and bottom indices
//! - High-order (2nd, 3rd, 4th) and donor-cell advective fluxes
//! - Flux-corrected transport (FCT) limiting for monotone transport
//! - Conservative assembly of fluxes into tracer tendencies
//! - A configurable engine choosing between standard and monotonic schemes
//!
//! ```
//! use tracer_advection::{AdvectionConfig, AdvectionEngine, AdvectionInputs, CellField, ColumnMesh, EdgeField, TracerField};
//!
//! let mesh = ColumnMesh::periodic_ring(4, 1.0, 1);
//! let tracers = TracerField::from_fn(1, 4, 1, |_, c, _| if c.get() == 2 { 10.0 } else { 0.0 });
//! let uh = EdgeField::uniform(4, 1, 1.0);
//! let w = CellField::new(4, 2);
//! let h = CellField::uniform(4, 1, 1.0);
//! let inputs = AdvectionInputs::new(&tracers, &uh, &w, &h, 1.0);
//!
//! let engine = AdvectionEngine::initialize(AdvectionConfig::default()).unwrap();
//! let mut tendency = TracerField::new(1, 4, 1);
//! engine.compute_tendency(&mesh, &inputs, "passive", &mut tendency);
//! assert!(tendency.data.iter().sum::<f64>().abs() < 1e-12);
//! ```

pub mod flux;
pub mod mesh;
pub mod solver;
pub mod types;

pub use flux::{AdvectionOrder, FluxSet};
pub use mesh::{ColumnMesh, MeshError};
pub use solver::{
    AdvectionConfig, AdvectionEngine, AdvectionInitError, AdvectionInputs, AdvectionScheme,
    CellField, ConfigError, EdgeField, InitStatus, TracerField, VerticalVelocitySign,
};
pub use types::{CellIndex, EdgeIndex, TracerIndex};
