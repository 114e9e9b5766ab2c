//! Tracer advection solver components.
//!
//! # Submodules
//!
//! - [`state`]: Field containers (tracers, layered inputs, per-call inputs)
//! - [`config`]: Run configuration and its validation
//! - [`error`]: Initialization errors and status bits
//! - [`assembly`]: Flux divergence into tendencies
//! - [`limiters`]: FCT flux limiter
//! - [`schemes`]: Standard and monotonic schemes
//! - [`diagnostics`]: Monotonicity check and tracer content
//! - [`driver`]: The [`AdvectionEngine`] entry point
//!
//! # Scheme Trait
//!
//! The [`TendencyScheme`] trait turns one tracer into canonical fluxes and
//! assembles them into tendencies:
//!
//! - [`StandardScheme`]: unlimited high-order fluxes
//! - [`MonotonicScheme`]: FCT-limited fluxes
//! - [`AdvectionScheme`]: enum for run-time selection

pub mod assembly;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod limiters;
pub mod schemes;
pub mod state;

pub use assembly::{accumulate_tendency, control_volume, net_inflow};
pub use config::{AdvectionConfig, ReconstructionParams, VerticalVelocitySign};
pub use diagnostics::{
    DEFAULT_MONOTONICITY_TOLERANCE, MonotonicityReport, MonotonicityViolation, check_monotonicity,
    tracer_content,
};
pub use driver::AdvectionEngine;
pub use error::{AdvectionInitError, ConfigError, InitStatus};
pub use limiters::{
    ControlVolumeBounds, CorrectionFactors, LimitingRatios, antidiffusive_fluxes, blend_fluxes,
    limit_fluxes,
};
pub use schemes::{AdvectionScheme, MonotonicScheme, StandardScheme, TendencyScheme};
pub use state::{AdvectionInputs, CellField, EdgeField, LayeredField, TracerField, TracerView};
