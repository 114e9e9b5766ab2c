//! Advective tracer fluxes.
//!
//! Provides the building blocks both advection schemes are assembled from:
//! - Face-value reconstruction formulas of order 2, 3 and 4
//! - High-order (unlimited) edge and interface fluxes
//! - Donor-cell (first-order upwind) fluxes
//!
//! # Sign conventions
//!
//! Every flux is stored once, in canonical orientation: horizontal fluxes
//! are positive from an edge's left cell to its right cell, vertical fluxes
//! are positive upwards. See [`FluxSet`].

mod flux_set;
mod high_order;
mod reconstruction;
mod upwind;

pub use flux_set::FluxSet;
pub use high_order::{
    edge_face_value, high_order_fluxes, horizontal_high_order_fluxes, vertical_high_order_fluxes,
};
pub use reconstruction::{
    AdvectionOrder, FOURTH_ORDER_WEIGHTS, THIRD_ORDER_CORRECTION_WEIGHTS, fourth_order_face_value,
    second_order_face_value, third_order_correction, third_order_face_value,
    thickness_weighted_face_value, upwind_value,
};
pub use upwind::{horizontal_upwind_fluxes, low_order_fluxes, vertical_upwind_fluxes};
