//! FCT-limited advection.

use crate::flux::{FluxSet, high_order_fluxes, low_order_fluxes};
use crate::mesh::ColumnMesh;
use crate::solver::config::{AdvectionConfig, ReconstructionParams};
use crate::solver::error::AdvectionInitError;
use crate::solver::limiters::limit_fluxes;
use crate::solver::state::{AdvectionInputs, TracerView};

use super::TendencyScheme;

/// High-order fluxes limited towards donor-cell fluxes so that no new
/// extrema are created.
///
/// The correction factors of a halo cell depend on that cell's own
/// neighbours, so this scheme needs one halo layer more than the
/// reconstruction stencil.
#[derive(Clone, Debug, PartialEq)]
pub struct MonotonicScheme {
    params: ReconstructionParams,
}

impl MonotonicScheme {
    /// Validate `config` for this scheme.
    pub fn init(config: &AdvectionConfig) -> Result<Self, AdvectionInitError> {
        let params = ReconstructionParams::from_config(config, "monotonic", 1)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ReconstructionParams {
        &self.params
    }
}

impl TendencyScheme for MonotonicScheme {
    fn tracer_fluxes(
        &self,
        mesh: &ColumnMesh,
        tracer: TracerView<'_>,
        inputs: &AdvectionInputs<'_>,
    ) -> FluxSet {
        let high = high_order_fluxes(mesh, tracer, inputs, &self.params);
        let low = low_order_fluxes(mesh, tracer, inputs, self.params.w_to_upward);
        limit_fluxes(mesh, tracer, &high, &low, inputs.layer_thickness, inputs.dt)
    }

    fn name(&self) -> &'static str {
        "monotonic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::error::{ConfigError, InitStatus};
    use crate::solver::state::{CellField, EdgeField, TracerField};

    #[test]
    fn test_needs_extra_halo() {
        let config = AdvectionConfig::default().with_orders(3, 3).with_halo_count(2);
        let err = MonotonicScheme::init(&config).unwrap_err();
        assert_eq!(err.status, InitStatus::INSUFFICIENT_HALOS);
        assert_eq!(
            err.errors,
            vec![ConfigError::InsufficientHalos {
                scheme: "monotonic",
                required: 3,
                available: 2
            }]
        );
    }

    #[test]
    fn test_square_pulse_stays_bounded() {
        let n = 20;
        let mesh = ColumnMesh::periodic_ring(n, 1.0, 1);
        let tracers =
            TracerField::from_fn(1, n, 1, |_, c, _| if (5..10).contains(&c.get()) { 1.0 } else { 0.0 });
        let uh = EdgeField::uniform(n, 1, 1.0);
        let w = CellField::new(n, 2);
        let h = CellField::uniform(n, 1, 1.0);
        let dt = 0.5;
        let inputs = AdvectionInputs::new(&tracers, &uh, &w, &h, dt);

        let scheme = MonotonicScheme::init(&AdvectionConfig::default().with_orders(4, 3)).unwrap();
        let mut tendency = TracerField::new(1, n, 1);
        scheme.compute_tendency(&mesh, &inputs, &mut tendency);

        for (phi, t) in tracers.data.iter().zip(&tendency.data) {
            let updated = phi + dt * t;
            assert!((-1e-12..=1.0 + 1e-12).contains(&updated), "{}", updated);
        }
    }
}
