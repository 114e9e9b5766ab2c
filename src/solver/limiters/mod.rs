//! Flux limiters for tracer advection.
//!
//! - [`limit_fluxes`]: complete FCT step for one tracer
//! - [`antidiffusive_fluxes`], [`ControlVolumeBounds`], [`CorrectionFactors`],
//!   [`LimitingRatios`], [`blend_fluxes`]: the individual stages

mod fct;

pub use fct::{
    ControlVolumeBounds, CorrectionFactors, LimitingRatios, antidiffusive_fluxes, blend_fluxes,
    limit_fluxes,
};
