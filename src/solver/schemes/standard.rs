//! Unlimited high-order advection.

use crate::flux::{FluxSet, high_order_fluxes};
use crate::mesh::ColumnMesh;
use crate::solver::config::{AdvectionConfig, ReconstructionParams};
use crate::solver::error::AdvectionInitError;
use crate::solver::state::{AdvectionInputs, TracerView};

use super::TendencyScheme;

/// High-order fluxes applied as they are.
///
/// Conservative but not monotone: new extrema may appear near sharp
/// gradients.
#[derive(Clone, Debug, PartialEq)]
pub struct StandardScheme {
    params: ReconstructionParams,
}

impl StandardScheme {
    /// Validate `config` for this scheme.
    pub fn init(config: &AdvectionConfig) -> Result<Self, AdvectionInitError> {
        let params = ReconstructionParams::from_config(config, "standard", 0)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ReconstructionParams {
        &self.params
    }
}

impl TendencyScheme for StandardScheme {
    fn tracer_fluxes(
        &self,
        mesh: &ColumnMesh,
        tracer: TracerView<'_>,
        inputs: &AdvectionInputs<'_>,
    ) -> FluxSet {
        high_order_fluxes(mesh, tracer, inputs, &self.params)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::error::{ConfigError, InitStatus};
    use crate::solver::state::{CellField, EdgeField, TracerField};

    #[test]
    fn test_init_rejects_bad_order() {
        let err = StandardScheme::init(&AdvectionConfig::default().with_orders(5, 3)).unwrap_err();
        assert_eq!(err.status, InitStatus::INVALID_HORIZONTAL_ORDER);
        assert_eq!(err.errors, vec![ConfigError::UnsupportedHorizontalOrder(5)]);
    }

    #[test]
    fn test_second_order_needs_one_halo() {
        let config = AdvectionConfig::default().with_orders(2, 2).with_halo_count(1);
        assert!(StandardScheme::init(&config).is_ok());
    }

    #[test]
    fn test_ring_sine_wave_tendency() {
        // Uniform flow on a periodic ring: tendency ≈ -u·dφ/dx
        let n = 64;
        let dx = 1.0 / n as f64;
        let mesh = ColumnMesh::periodic_ring(n, dx, 1);
        let x = |c: usize| (c as f64 + 0.5) * dx;
        let two_pi = 2.0 * std::f64::consts::PI;
        let tracers = TracerField::from_fn(1, n, 1, |_, c, _| (two_pi * x(c.get())).sin());
        let uh = EdgeField::uniform(n, 1, 1.0);
        let w = CellField::new(n, 2);
        let h = CellField::uniform(n, 1, 1.0);
        let inputs = AdvectionInputs::new(&tracers, &uh, &w, &h, 0.0);

        let scheme = StandardScheme::init(&AdvectionConfig::default().with_orders(4, 2)).unwrap();
        let mut tendency = TracerField::new(1, n, 1);
        scheme.compute_tendency(&mesh, &inputs, &mut tendency);

        for c in 0..n {
            let exact = -two_pi * (two_pi * x(c)).cos();
            assert!((tendency.data[c] - exact).abs() < 1e-2, "cell {}", c);
        }
    }
}
