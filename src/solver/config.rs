//! Run configuration of the advection kernel.
//!
//! The configuration is set once, validated by
//! [`AdvectionEngine::initialize`](crate::solver::AdvectionEngine::initialize)
//! and read-only afterwards.

use crate::flux::AdvectionOrder;

use super::error::ConfigError;

/// Sign convention of the supplied vertical velocity.
///
/// Layers are numbered from the surface downwards; internally all vertical
/// fluxes are positive upwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalVelocitySign {
    /// Positive w moves water towards the surface (default)
    #[default]
    PositiveUp,
    /// Positive w moves water towards the seafloor
    PositiveDown,
}

impl VerticalVelocitySign {
    /// Factor converting the supplied w to upward velocity.
    #[inline]
    pub fn to_upward(self) -> f64 {
        match self {
            Self::PositiveUp => 1.0,
            Self::PositiveDown => -1.0,
        }
    }
}

/// Configuration surface of the tracer advection kernel.
///
/// Orders are kept as the raw integers of the run configuration so that an
/// invalid value can be reported at initialization rather than rejected at
/// parse time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdvectionConfig {
    /// Master switch; when false the kernel is a no-op
    pub enabled: bool,
    /// Use the FCT-limited scheme instead of the unlimited one
    pub monotonic: bool,
    /// Horizontal reconstruction order (2, 3 or 4)
    pub horizontal_order: u32,
    /// Vertical reconstruction order (2, 3 or 4)
    pub vertical_order: u32,
    /// Weight of the upwind-biased correction in the 3rd-order scheme
    pub coef_3rd_order: f64,
    /// Sign convention of the vertical velocity input
    pub vertical_velocity_sign: VerticalVelocitySign,
    /// Number of halo cell layers available in the input fields
    pub halo_count: u32,
    /// Check the limited result against its bounds and log violations
    pub check_monotonicity: bool,
}

impl Default for AdvectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            monotonic: true,
            horizontal_order: 3,
            vertical_order: 3,
            coef_3rd_order: 0.25,
            vertical_velocity_sign: VerticalVelocitySign::PositiveUp,
            halo_count: 3,
            check_monotonicity: false,
        }
    }
}

impl AdvectionConfig {
    /// Default configuration with advection switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Select the FCT-limited scheme (true) or the unlimited one (false).
    pub fn with_monotonic(mut self, monotonic: bool) -> Self {
        self.monotonic = monotonic;
        self
    }

    /// Set horizontal and vertical reconstruction orders.
    pub fn with_orders(mut self, horizontal: u32, vertical: u32) -> Self {
        self.horizontal_order = horizontal;
        self.vertical_order = vertical;
        self
    }

    /// Set the third-order blending coefficient.
    ///
    /// 0 gives the centred 4th-order value, 1 the fully upwind-biased
    /// 3rd-order value.
    pub fn with_coef_3rd_order(mut self, coef: f64) -> Self {
        self.coef_3rd_order = coef;
        self
    }

    pub fn with_vertical_velocity_sign(mut self, sign: VerticalVelocitySign) -> Self {
        self.vertical_velocity_sign = sign;
        self
    }

    pub fn with_halo_count(mut self, halo_count: u32) -> Self {
        self.halo_count = halo_count;
        self
    }

    /// Enable the post-limiter monotonicity diagnostic.
    pub fn with_monotonicity_check(mut self, check: bool) -> Self {
        self.check_monotonicity = check;
        self
    }

    /// Parsed horizontal order, or the error describing why it is invalid.
    pub fn horizontal_order(&self) -> Result<AdvectionOrder, ConfigError> {
        AdvectionOrder::from_integer(self.horizontal_order)
            .ok_or(ConfigError::UnsupportedHorizontalOrder(self.horizontal_order))
    }

    /// Parsed vertical order, or the error describing why it is invalid.
    pub fn vertical_order(&self) -> Result<AdvectionOrder, ConfigError> {
        AdvectionOrder::from_integer(self.vertical_order)
            .ok_or(ConfigError::UnsupportedVerticalOrder(self.vertical_order))
    }
}

/// Validated reconstruction parameters shared by both schemes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconstructionParams {
    pub horizontal_order: AdvectionOrder,
    pub vertical_order: AdvectionOrder,
    pub coef_3rd_order: f64,
    /// Factor converting supplied w to upward velocity
    pub w_to_upward: f64,
}

impl ReconstructionParams {
    /// Validate the parts of `config` every scheme depends on.
    ///
    /// `extra_halos` is the number of halo layers the scheme needs beyond
    /// the reconstruction stencil itself. All problems are collected.
    pub(crate) fn from_config(
        config: &AdvectionConfig,
        scheme: &'static str,
        extra_halos: u32,
    ) -> Result<Self, Vec<ConfigError>> {
        let mut errors = Vec::new();

        let horizontal_order = config.horizontal_order().map_err(|e| errors.push(e)).ok();
        let vertical_order = config.vertical_order().map_err(|e| errors.push(e)).ok();

        let coef = config.coef_3rd_order;
        if !(0.0..=1.0).contains(&coef) {
            errors.push(ConfigError::InvalidBlendingCoefficient(coef));
        }

        if config.halo_count == 0 {
            errors.push(ConfigError::NonPositiveHaloCount);
        } else if let Some(order) = horizontal_order {
            let required = order.stencil_halo_width() + extra_halos;
            if config.halo_count < required {
                errors.push(ConfigError::InsufficientHalos {
                    scheme,
                    required,
                    available: config.halo_count,
                });
            }
        }

        match (horizontal_order, vertical_order) {
            (Some(horizontal_order), Some(vertical_order)) if errors.is_empty() => Ok(Self {
                horizontal_order,
                vertical_order,
                coef_3rd_order: coef,
                w_to_upward: config.vertical_velocity_sign.to_upward(),
            }),
            _ => Err(errors),
        }
    }
}
