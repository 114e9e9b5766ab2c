//! Field containers consumed and produced by the advection kernel.
//!
//! - [`TracerField`], [`TracerView`]: concentrations and tendencies (tracer, cell, layer)
//! - [`LayeredField`], [`CellField`], [`EdgeField`]: per-column layered inputs and flux buffers
//! - [`AdvectionInputs`]: the per-call bundle of read-only inputs

mod inputs;
mod layered;
mod tracer;

pub use inputs::AdvectionInputs;
pub use layered::{CellField, EdgeField, LayeredField};
pub use tracer::{TracerField, TracerView};
