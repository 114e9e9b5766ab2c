//! Runtime diagnostics for tracer advection.
//!
//! Provides:
//! - Monotonicity checking of an advective update against the pre-step
//!   neighbourhood bounds used by the FCT limiter
//! - Total tracer content, for conservation checks
//!
//! # Example
//!
//! ```ignore
//! use tracer_advection::solver::{check_monotonicity, tracer_content};
//!
//! let report = check_monotonicity(&mesh, &inputs, &tendency, DEFAULT_MONOTONICITY_TOLERANCE);
//! for v in &report.violations {
//!     println!("{}", v);
//! }
//! let total = tracer_content(&mesh, &thickness, &tracers, TracerIndex::new(0));
//! ```

use std::fmt;

use crate::mesh::ColumnMesh;
use crate::solver::limiters::ControlVolumeBounds;
use crate::solver::state::{AdvectionInputs, CellField, TracerField};
use crate::types::{CellIndex, TracerIndex};

/// Relative tolerance applied to the bounds before a value is reported.
pub const DEFAULT_MONOTONICITY_TOLERANCE: f64 = 1e-10;

/// A control volume whose updated value left its bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonotonicityViolation {
    pub tracer: TracerIndex,
    pub cell: CellIndex,
    pub layer: usize,
    /// Updated value `φ + dt·tendency`
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl MonotonicityViolation {
    /// Distance outside `[min, max]`.
    pub fn excess(&self) -> f64 {
        (self.min - self.value).max(self.value - self.max).max(0.0)
    }
}

impl fmt::Display for MonotonicityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tracer {} cell {} layer {}: {:.6e} outside [{:.6e}, {:.6e}]",
            self.tracer, self.cell, self.layer, self.value, self.min, self.max
        )
    }
}

/// Result of a monotonicity check.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonotonicityReport {
    pub violations: Vec<MonotonicityViolation>,
    /// Number of control volumes checked
    pub checked: usize,
}

impl MonotonicityReport {
    pub fn is_monotone(&self) -> bool {
        self.violations.is_empty()
    }

    /// Largest distance outside the bounds, 0 if monotone.
    pub fn max_excess(&self) -> f64 {
        self.violations
            .iter()
            .map(MonotonicityViolation::excess)
            .fold(0.0, f64::max)
    }
}

/// Check `φ + dt·tendency` of every owned, active control volume against
/// the pre-step bounds of its neighbourhood.
///
/// `tendency` must hold the advective tendency only.
pub fn check_monotonicity(
    mesh: &ColumnMesh,
    inputs: &AdvectionInputs<'_>,
    tendency: &TracerField,
    tolerance: f64,
) -> MonotonicityReport {
    let mut report = MonotonicityReport::default();

    for t in TracerIndex::iter(inputs.tracers.n_tracers) {
        let tracer = inputs.tracers.tracer(t);
        let bounds = ControlVolumeBounds::compute(mesh, tracer);
        for c in mesh.owned_cells() {
            for k in 0..mesh.max_level(c) {
                report.checked += 1;
                let value = tracer.get(c, k) + inputs.dt * tendency.get(t, c, k);
                let (min, max) = bounds.get(c, k);
                let allowance = tolerance * (1.0 + min.abs().max(max.abs()));
                if value < min - allowance || value > max + allowance {
                    report.violations.push(MonotonicityViolation {
                        tracer: t,
                        cell: c,
                        layer: k,
                        value,
                        min,
                        max,
                    });
                }
            }
        }
    }

    report
}

/// Total content `Σ area·h·φ` of tracer `t` over owned, active control
/// volumes.
///
/// Applied to a tendency field this gives the rate of change of the
/// content, which vanishes for advection in a closed domain.
pub fn tracer_content(
    mesh: &ColumnMesh,
    layer_thickness: &CellField,
    field: &TracerField,
    t: TracerIndex,
) -> f64 {
    mesh.owned_cells()
        .map(|c| {
            let area = mesh.cell(c).area;
            (0..mesh.max_level(c))
                .map(|k| area * layer_thickness.get(c, k) * field.get(t, c, k))
                .sum::<f64>()
        })
        .sum()
}
