//! Entry point of the tracer advection kernel.
//!
//! [`AdvectionEngine::initialize`] validates the configuration once; the
//! resulting engine is immutable and keeps no state between calls, so a
//! single engine may serve every tracer group of a model.

use log::{debug, warn};

use crate::mesh::ColumnMesh;
use crate::solver::config::AdvectionConfig;
use crate::solver::diagnostics::{DEFAULT_MONOTONICITY_TOLERANCE, check_monotonicity};
use crate::solver::error::{AdvectionInitError, ConfigError};
use crate::solver::schemes::{AdvectionScheme, MonotonicScheme, StandardScheme, TendencyScheme};
use crate::solver::state::{AdvectionInputs, TracerField};

/// Validated, ready-to-use advection kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvectionEngine {
    config: AdvectionConfig,
    scheme: AdvectionScheme,
}

impl AdvectionEngine {
    /// Validate `config` through both schemes.
    ///
    /// The configuration is checked even when advection is disabled. The
    /// problems found by the standard and the monotonic scheme are merged,
    /// so the returned status is the union of both.
    pub fn initialize(config: AdvectionConfig) -> Result<Self, AdvectionInitError> {
        let standard = StandardScheme::init(&config);
        let monotonic = MonotonicScheme::init(&config);

        let mut failures = Vec::new();
        if let Err(err) = &standard {
            failures.push(err.clone());
        }
        if let Err(err) = &monotonic {
            failures.push(err.clone());
        }
        if config.check_monotonicity && !config.monotonic {
            failures.push(AdvectionInitError::from(vec![
                ConfigError::MonotonicityCheckWithoutLimiter,
            ]));
        }
        let combined = failures.into_iter().reduce(|mut acc, err| {
            acc.merge(err);
            acc
        });
        if let Some(err) = combined {
            return Err(err);
        }

        let scheme = match (config.monotonic, monotonic, standard) {
            (true, Ok(monotonic), _) => AdvectionScheme::Monotonic(monotonic),
            (false, _, Ok(standard)) => AdvectionScheme::Standard(standard),
            (_, Err(err), _) | (_, _, Err(err)) => return Err(err),
        };

        debug!(
            "tracer advection initialized: enabled={}, scheme={}, horizontal {}, vertical {}, coef_3rd_order={}, halos={}",
            config.enabled,
            scheme.name(),
            config.horizontal_order,
            config.vertical_order,
            config.coef_3rd_order,
            config.halo_count
        );

        Ok(Self { config, scheme })
    }

    pub fn config(&self) -> &AdvectionConfig {
        &self.config
    }

    pub fn scheme(&self) -> &AdvectionScheme {
        &self.scheme
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Add the advective tendency of every tracer in `inputs` to `tendency`.
    ///
    /// Does nothing when advection is disabled. `group` labels the tracer
    /// group in log messages.
    ///
    /// # Panics
    ///
    /// Panics if the input or tendency shapes do not match `mesh`, or if a
    /// partitioned `mesh` carries fewer halo rings than the configured
    /// halo count.
    pub fn compute_tendency(
        &self,
        mesh: &ColumnMesh,
        inputs: &AdvectionInputs<'_>,
        group: &str,
        tendency: &mut TracerField,
    ) {
        if !self.config.enabled {
            return;
        }
        inputs.assert_consistent(mesh, tendency);
        self.assert_halo_depth(mesh);

        if !self.config.check_monotonicity {
            self.scheme.compute_tendency(mesh, inputs, tendency);
            return;
        }

        // The check needs the advective part on its own
        let t = inputs.tracers;
        let mut advective = TracerField::new(t.n_tracers, t.n_cells, t.n_layers);
        self.scheme.compute_tendency(mesh, inputs, &mut advective);

        let report = check_monotonicity(mesh, inputs, &advective, DEFAULT_MONOTONICITY_TOLERANCE);
        for violation in &report.violations {
            warn!("{}: monotonicity violated, {}", group, violation);
        }
        if !report.is_monotone() {
            warn!(
                "{}: {} of {} control volumes outside bounds (max excess {:.3e})",
                group,
                report.violations.len(),
                report.checked,
                report.max_excess()
            );
        }

        tendency.accumulate(&advective);
    }

    /// A mesh without halo cells is a whole domain and needs none.
    fn assert_halo_depth(&self, mesh: &ColumnMesh) {
        let depth = u32::from(mesh.halo_depth());
        assert!(
            depth == 0 || depth >= self.config.halo_count,
            "mesh carries {} halo rings, configuration requires {}",
            depth,
            self.config.halo_count
        );
    }
}
