//! Initialization errors for the advection schemes.
//!
//! Configuration problems are reported, never thrown: each sub-engine
//! returns the set of problems it found as an [`InitStatus`] bit set plus
//! the individual [`ConfigError`]s, and the driver merges the sets of all
//! sub-engines into one [`AdvectionInitError`].

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use thiserror::Error;

/// One configuration problem.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Horizontal order other than 2, 3 or 4.
    #[error("unsupported horizontal advection order {0} (expected 2, 3 or 4)")]
    UnsupportedHorizontalOrder(u32),

    /// Vertical order other than 2, 3 or 4.
    #[error("unsupported vertical advection order {0} (expected 2, 3 or 4)")]
    UnsupportedVerticalOrder(u32),

    /// Halo count of zero.
    #[error("halo count must be positive")]
    NonPositiveHaloCount,

    /// Fewer halo layers than the stencils reach into.
    #[error("{scheme} scheme needs at least {required} halo layers, {available} configured")]
    InsufficientHalos {
        scheme: &'static str,
        required: u32,
        available: u32,
    },

    /// Blending coefficient outside [0, 1].
    #[error("third-order blending coefficient {0} is outside [0, 1]")]
    InvalidBlendingCoefficient(f64),

    /// Monotonicity check requested for a scheme that does not limit.
    #[error("monotonicity check requires the monotonic scheme")]
    MonotonicityCheckWithoutLimiter,
}

impl ConfigError {
    /// Status bit reported for this error.
    pub fn status(&self) -> InitStatus {
        match self {
            Self::UnsupportedHorizontalOrder(_) => InitStatus::INVALID_HORIZONTAL_ORDER,
            Self::UnsupportedVerticalOrder(_) => InitStatus::INVALID_VERTICAL_ORDER,
            Self::NonPositiveHaloCount => InitStatus::INVALID_HALO_COUNT,
            Self::InsufficientHalos { .. } => InitStatus::INSUFFICIENT_HALOS,
            Self::InvalidBlendingCoefficient(_) => InitStatus::INVALID_BLENDING_COEFFICIENT,
            Self::MonotonicityCheckWithoutLimiter => InitStatus::CONFLICTING_FLAGS,
        }
    }
}

/// Bit set of initialization failures; zero means success.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InitStatus(u32);

impl InitStatus {
    pub const OK: Self = Self(0);
    pub const INVALID_HORIZONTAL_ORDER: Self = Self(1 << 0);
    pub const INVALID_VERTICAL_ORDER: Self = Self(1 << 1);
    pub const INVALID_HALO_COUNT: Self = Self(1 << 2);
    pub const INSUFFICIENT_HALOS: Self = Self(1 << 3);
    pub const INVALID_BLENDING_COEFFICIENT: Self = Self(1 << 4);
    pub const CONFLICTING_FLAGS: Self = Self(1 << 5);

    /// Raw status code.
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    /// Whether every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for InitStatus {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for InitStatus {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for InitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Combined initialization failure of the advection engine.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("tracer advection initialization failed (status {status}): {}", join(.errors))]
pub struct AdvectionInitError {
    /// Union of the status bits of every failing sub-engine
    pub status: InitStatus,
    /// Every distinct problem found
    pub errors: Vec<ConfigError>,
}

impl AdvectionInitError {
    /// Build from a list of problems; `None` if the list is empty.
    pub fn from_errors(errors: Vec<ConfigError>) -> Option<Self> {
        if errors.is_empty() {
            return None;
        }
        Some(Self::from(errors))
    }

    /// Merge another failure into this one (bitwise union of statuses).
    pub fn merge(&mut self, other: AdvectionInitError) {
        self.status |= other.status;
        for error in other.errors {
            if !self.errors.contains(&error) {
                self.errors.push(error);
            }
        }
    }
}

impl From<Vec<ConfigError>> for AdvectionInitError {
    fn from(errors: Vec<ConfigError>) -> Self {
        let status = errors
            .iter()
            .fold(InitStatus::OK, |status, e| status | e.status());
        Self { status, errors }
    }
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
