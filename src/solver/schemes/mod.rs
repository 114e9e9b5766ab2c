//! Advection schemes.
//!
//! The [`TendencyScheme`] trait is the seam between the driver and the
//! flux construction. Two implementations exist:
//!
//! - [`StandardScheme`]: unlimited high-order fluxes
//! - [`MonotonicScheme`]: high-order fluxes limited towards donor-cell by FCT
//!
//! [`AdvectionScheme`] wraps both for dispatch when the choice is made at
//! run time from the configuration.

mod monotonic;
mod standard;

pub use monotonic::MonotonicScheme;
pub use standard::StandardScheme;

use crate::flux::FluxSet;
use crate::mesh::ColumnMesh;
use crate::solver::assembly::accumulate_tendency;
use crate::solver::state::{AdvectionInputs, TracerField, TracerView};
use crate::types::TracerIndex;

/// Scheme turning a tracer field into canonical advective fluxes.
pub trait TendencyScheme: Send + Sync {
    /// Canonical fluxes of one tracer.
    fn tracer_fluxes(
        &self,
        mesh: &ColumnMesh,
        tracer: TracerView<'_>,
        inputs: &AdvectionInputs<'_>,
    ) -> FluxSet;

    /// Short identifier used in log messages.
    fn name(&self) -> &'static str;

    /// Add the advective tendency of every tracer in `inputs` to `tendency`.
    ///
    /// Tracers are independent and processed in index order.
    fn compute_tendency(
        &self,
        mesh: &ColumnMesh,
        inputs: &AdvectionInputs<'_>,
        tendency: &mut TracerField,
    ) {
        for t in TracerIndex::iter(inputs.tracers.n_tracers) {
            let fluxes = self.tracer_fluxes(mesh, inputs.tracers.tracer(t), inputs);
            accumulate_tendency(mesh, &fluxes, inputs.layer_thickness, tendency.tracer_mut(t));
        }
    }
}

/// Run-time selected advection scheme.
#[derive(Clone, Debug, PartialEq)]
pub enum AdvectionScheme {
    /// Unlimited high-order fluxes
    Standard(StandardScheme),
    /// FCT-limited fluxes
    Monotonic(MonotonicScheme),
}

impl AdvectionScheme {
    pub fn is_monotonic(&self) -> bool {
        matches!(self, Self::Monotonic(_))
    }
}

impl TendencyScheme for AdvectionScheme {
    fn tracer_fluxes(
        &self,
        mesh: &ColumnMesh,
        tracer: TracerView<'_>,
        inputs: &AdvectionInputs<'_>,
    ) -> FluxSet {
        match self {
            Self::Standard(scheme) => scheme.tracer_fluxes(mesh, tracer, inputs),
            Self::Monotonic(scheme) => scheme.tracer_fluxes(mesh, tracer, inputs),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Standard(scheme) => scheme.name(),
            Self::Monotonic(scheme) => scheme.name(),
        }
    }
}
