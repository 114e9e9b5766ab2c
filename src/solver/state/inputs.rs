//! Read-only inputs of one tendency evaluation.

use crate::mesh::ColumnMesh;

use super::layered::{CellField, EdgeField};
use super::tracer::TracerField;

/// Inputs supplied fresh by the time stepper on every call.
///
/// All fields are assumed to be halo-updated already. Shapes:
///
/// | field | columns | levels |
/// |---|---|---|
/// | `tracers` | cells (per tracer) | `n_layers` |
/// | `normal_thickness_flux` | edges | `n_layers` |
/// | `vertical_velocity` | cells | `n_layers + 1` (interface 0 = surface) |
/// | `layer_thickness` | cells | `n_layers` |
#[derive(Clone, Copy, Debug)]
pub struct AdvectionInputs<'a> {
    /// Tracer concentrations
    pub tracers: &'a TracerField,
    /// Edge-normal velocity × layer thickness at the edge (m²/s), positive left → right
    pub normal_thickness_flux: &'a EdgeField,
    /// Vertical velocity at layer interfaces (m/s), sign per configuration
    pub vertical_velocity: &'a CellField,
    /// Layer thickness (m)
    pub layer_thickness: &'a CellField,
    /// Time step (s)
    pub dt: f64,
}

impl<'a> AdvectionInputs<'a> {
    pub fn new(
        tracers: &'a TracerField,
        normal_thickness_flux: &'a EdgeField,
        vertical_velocity: &'a CellField,
        layer_thickness: &'a CellField,
        dt: f64,
    ) -> Self {
        Self {
            tracers,
            normal_thickness_flux,
            vertical_velocity,
            layer_thickness,
            dt,
        }
    }

    /// Fail fast on inputs that do not match the mesh.
    ///
    /// # Panics
    ///
    /// Panics on any shape mismatch or a non-finite time step. These are
    /// contract violations by the caller, not recoverable conditions.
    pub fn assert_consistent(&self, mesh: &ColumnMesh, tendency: &TracerField) {
        let (n_cells, n_edges, n_layers) = (mesh.n_cells(), mesh.n_edges(), mesh.n_layers);
        assert!(
            self.tracers.n_cells == n_cells && self.tracers.n_layers == n_layers,
            "tracer field is {}x{} (cells x layers), mesh is {}x{}",
            self.tracers.n_cells,
            self.tracers.n_layers,
            n_cells,
            n_layers
        );
        assert!(
            tendency.has_shape(self.tracers.n_tracers, n_cells, n_layers),
            "tendency field shape does not match tracer field"
        );
        assert!(
            self.normal_thickness_flux.has_shape(n_edges, n_layers),
            "normal thickness flux must be {} edges x {} layers",
            n_edges,
            n_layers
        );
        assert!(
            self.vertical_velocity.has_shape(n_cells, n_layers + 1),
            "vertical velocity must be {} cells x {} interfaces",
            n_cells,
            n_layers + 1
        );
        assert!(
            self.layer_thickness.has_shape(n_cells, n_layers),
            "layer thickness must be {} cells x {} layers",
            n_cells,
            n_layers
        );
        assert!(self.dt.is_finite(), "time step must be finite, got {}", self.dt);
    }
}
