//! Face-value reconstruction formulas.
//!
//! All high-order fluxes in this crate are `transport × φ_face`, where the
//! face value is reconstructed from cell (or layer) means. Along a line of
//! four equally spaced means `q_{i-1}, q_i, q_{i+1}, q_{i+2}` with the face
//! at `i + ½`:
//!
//! ```text
//! 4th order:  φ₄ = (7(q_i + q_{i+1}) − (q_{i-1} + q_{i+2})) / 12
//! 3rd order:  φ₃ = φ₄ + s·β·((q_{i+2} − q_{i-1}) − 3(q_{i+1} − q_i)) / 12
//! ```
//!
//! where `s = +1` when the flow runs from `i` to `i+1` and `β` is the
//! third-order blending coefficient. `β = 1` gives the classical
//! upwind-biased third-order face value; `β = 0` recovers 4th order.
//!
//! On the unstructured horizontal mesh the same two operators are stored
//! per edge as stencil weights (see [`EdgeStencil`](crate::mesh::EdgeStencil));
//! the functions here are used for the vertical direction and to build the
//! weights of the bundled test meshes.

use std::fmt;

/// Reconstruction order for advective face values.
///
/// Ordering follows accuracy, so `min` of two orders is the lower one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdvectionOrder {
    /// Centred two-point average.
    Second,
    /// Fourth-order value with an upwind-biased correction.
    Third,
    /// Centred four-point value.
    Fourth,
}

impl AdvectionOrder {
    /// Parse the integer order used in run configurations.
    ///
    /// Returns `None` for anything other than 2, 3 or 4.
    pub fn from_integer(order: u32) -> Option<Self> {
        match order {
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            4 => Some(Self::Fourth),
            _ => None,
        }
    }

    /// Integer order (2, 3 or 4).
    pub fn as_integer(self) -> u32 {
        match self {
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
        }
    }

    /// Whether this order needs the wide (four-point) stencil.
    pub fn needs_wide_stencil(self) -> bool {
        self != Self::Second
    }

    /// Number of halo cell layers the horizontal stencil reaches into.
    pub fn stencil_halo_width(self) -> u32 {
        if self.needs_wide_stencil() { 2 } else { 1 }
    }
}

impl fmt::Display for AdvectionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order {}", self.as_integer())
    }
}

/// Centred second-order face value.
#[inline]
pub fn second_order_face_value(q_i: f64, q_ip1: f64) -> f64 {
    0.5 * (q_i + q_ip1)
}

/// Second-order face value between two layers of different thickness.
///
/// Each layer is weighted by the thickness of the *other* layer, which is
/// linear interpolation to the shared interface.
#[inline]
pub fn thickness_weighted_face_value(q_above: f64, q_below: f64, h_above: f64, h_below: f64) -> f64 {
    (h_below * q_above + h_above * q_below) / (h_above + h_below)
}

/// Centred fourth-order face value at `i + ½`.
#[inline]
pub fn fourth_order_face_value(q_im1: f64, q_i: f64, q_ip1: f64, q_ip2: f64) -> f64 {
    (7.0 * (q_i + q_ip1) - (q_im1 + q_ip2)) / 12.0
}

/// Upwind-biased correction `((q_{i+2} − q_{i-1}) − 3(q_{i+1} − q_i)) / 12`.
///
/// This is proportional to the jump in second derivative across the face
/// and sums to zero for constant data.
#[inline]
pub fn third_order_correction(q_im1: f64, q_i: f64, q_ip1: f64, q_ip2: f64) -> f64 {
    ((q_ip2 - q_im1) - 3.0 * (q_ip1 - q_i)) / 12.0
}

/// Blended third-order face value at `i + ½`.
///
/// `direction` is `+1.0` when the flow runs from `i` towards `i+1` and
/// `-1.0` otherwise.
#[inline]
pub fn third_order_face_value(
    q_im1: f64,
    q_i: f64,
    q_ip1: f64,
    q_ip2: f64,
    direction: f64,
    coef_3rd_order: f64,
) -> f64 {
    fourth_order_face_value(q_im1, q_i, q_ip1, q_ip2)
        + direction * coef_3rd_order * third_order_correction(q_im1, q_i, q_ip1, q_ip2)
}

/// Donor-cell value: the upstream side of the face.
///
/// `transport > 0` means flow from the `left` side to the `right` side.
#[inline]
pub fn upwind_value(left: f64, right: f64, transport: f64) -> f64 {
    if transport > 0.0 { left } else { right }
}

/// `+1` for non-negative transport, `-1` otherwise.
#[inline]
pub(crate) fn flow_direction(transport: f64) -> f64 {
    if transport >= 0.0 { 1.0 } else { -1.0 }
}

/// Centred fourth-order weights for the points `[i-1, i, i+1, i+2]`.
pub const FOURTH_ORDER_WEIGHTS: [f64; 4] = [-1.0 / 12.0, 7.0 / 12.0, 7.0 / 12.0, -1.0 / 12.0];

/// Third-order correction weights for the points `[i-1, i, i+1, i+2]`.
pub const THIRD_ORDER_CORRECTION_WEIGHTS: [f64; 4] =
    [-1.0 / 12.0, 3.0 / 12.0, -3.0 / 12.0, 1.0 / 12.0];
