//! Flux-corrected transport (FCT) limiter for layered tracer advection.
//!
//! The high-order flux is split into the donor-cell flux plus an
//! antidiffusive correction, and the correction is scaled per edge and
//! interface so that the updated value of every control volume stays
//! inside the range spanned by itself and its neighbours before the step.
//!
//! Steps, per tracer:
//! 1. Provisional low-order value `φ_lo = φ + dt·div(F_low)/V`
//! 2. Antidiffusive flux `A = F_high − F_low`
//! 3. Local bounds `[φ_min, φ_max]` over the volume, its same-layer edge
//!    neighbours and the layers directly above and below
//! 4. Correction factors `R± = min(1, Q±/P±)` from the admissible (`Q±`)
//!    and requested (`P±`) inflow and outflow of antidiffusive tracer
//! 5. Per-face coefficient `C = min(R+[receiver], R−[donor])`
//! 6. Limited flux `F = F_low + C·A`
//!
//! # References
//! - Zalesak (1979), "Fully multidimensional flux-corrected transport
//!   algorithms for fluids"

use crate::flux::FluxSet;
use crate::mesh::ColumnMesh;
use crate::solver::assembly::{control_volume, net_inflow};
use crate::solver::state::{CellField, EdgeField, LayeredField, TracerView};
use crate::types::CellIndex;

/// Antidiffusive fluxes `high − low`.
pub fn antidiffusive_fluxes(high: &FluxSet, low: &FluxSet) -> FluxSet {
    high.difference(low)
}

/// Pre-step tracer range around each control volume.
///
/// Entries of inactive layers are zero and never read.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlVolumeBounds {
    pub min: CellField,
    pub max: CellField,
}

impl ControlVolumeBounds {
    /// Bounds over the volume itself, its active same-layer edge
    /// neighbours and the active layers above and below.
    pub fn compute(mesh: &ColumnMesh, tracer: TracerView<'_>) -> Self {
        let mut min = CellField::new(mesh.n_cells(), mesh.n_layers);
        let mut max = CellField::new(mesh.n_cells(), mesh.n_layers);
        CellField::fill_column_pairs(&mut min, &mut max, |c, lows, highs| {
            for k in 0..mesh.max_level(c) {
                (lows[k], highs[k]) = neighbourhood_range(mesh, tracer, c, k);
            }
        });
        Self { min, max }
    }

    /// `(min, max)` of control volume `(c, k)`.
    #[inline]
    pub fn get(&self, c: CellIndex, k: usize) -> (f64, f64) {
        (self.min.get(c, k), self.max.get(c, k))
    }
}

fn neighbourhood_range(mesh: &ColumnMesh, tracer: TracerView<'_>, c: CellIndex, k: usize) -> (f64, f64) {
    let phi = tracer.get(c, k);
    let (mut lo, mut hi) = (phi, phi);
    let mut include = |value: f64| {
        lo = lo.min(value);
        hi = hi.max(value);
    };

    for eoc in &mesh.cell(c).edges {
        if let Some(neighbour) = mesh.edge(eoc.edge).other(c) {
            if mesh.cell(neighbour).is_active(k) {
                include(tracer.get(neighbour, k));
            }
        }
    }
    if k > 0 {
        include(tracer.get(c, k - 1));
    }
    if mesh.cell(c).is_active(k + 1) {
        include(tracer.get(c, k + 1));
    }
    (lo, hi)
}

/// Zalesak correction factors `R+` (inflow) and `R−` (outflow) per
/// control volume, each in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionFactors {
    pub plus: CellField,
    pub minus: CellField,
}

impl CorrectionFactors {
    /// Largest fractions of the antidiffusive inflow and outflow each
    /// control volume can accept without leaving its bounds.
    pub fn compute(
        mesh: &ColumnMesh,
        tracer: TracerView<'_>,
        low: &FluxSet,
        antidiffusive: &FluxSet,
        bounds: &ControlVolumeBounds,
        layer_thickness: &CellField,
        dt: f64,
    ) -> Self {
        let ratios = |c: CellIndex, k: usize| {
            let volume = control_volume(mesh, layer_thickness, c, k);
            let phi_low = tracer.get(c, k) + dt * net_inflow(mesh, low, c, k) / volume;
            let (phi_min, phi_max) = bounds.get(c, k);
            let (p_plus, p_minus) = antidiffusive_exchange(mesh, antidiffusive, c, k);
            (
                correction_ratio((phi_max - phi_low) * volume, dt * p_plus),
                correction_ratio((phi_low - phi_min) * volume, dt * p_minus),
            )
        };

        let mut plus = CellField::new(mesh.n_cells(), mesh.n_layers);
        let mut minus = CellField::new(mesh.n_cells(), mesh.n_layers);
        CellField::fill_column_pairs(&mut plus, &mut minus, |c, plus, minus| {
            for k in 0..mesh.max_level(c) {
                (plus[k], minus[k]) = ratios(c, k);
            }
        });
        Self { plus, minus }
    }
}

/// Sum of antidiffusive inflows (`P+`) and outflows (`P−`, as a magnitude)
/// of control volume `(c, k)`.
fn antidiffusive_exchange(mesh: &ColumnMesh, antidiffusive: &FluxSet, c: CellIndex, k: usize) -> (f64, f64) {
    let mut p_plus = 0.0;
    let mut p_minus = 0.0;
    let mut add = |inflow: f64| {
        if inflow > 0.0 {
            p_plus += inflow;
        } else {
            p_minus -= inflow;
        }
    };

    for eoc in &mesh.cell(c).edges {
        add(eoc.sign * antidiffusive.horizontal.get(eoc.edge, k));
    }
    add(antidiffusive.vertical.get(c, k + 1));
    add(-antidiffusive.vertical.get(c, k));
    (p_plus, p_minus)
}

/// `clamp(q/p, 0, 1)`, or 1 when nothing is requested.
#[inline]
fn correction_ratio(admissible: f64, requested: f64) -> f64 {
    if requested <= 0.0 {
        1.0
    } else {
        (admissible / requested).clamp(0.0, 1.0)
    }
}

/// Per-face limiting coefficients `C` in `[0, 1]`, shaped like a
/// [`FluxSet`].
#[derive(Clone, Debug, PartialEq)]
pub struct LimitingRatios {
    pub horizontal: EdgeField,
    pub vertical: CellField,
}

impl LimitingRatios {
    /// All corrections rejected: the blend reduces to the low-order flux.
    pub fn zeros(mesh: &ColumnMesh) -> Self {
        Self {
            horizontal: EdgeField::new(mesh.n_edges(), mesh.n_layers),
            vertical: CellField::new(mesh.n_cells(), mesh.n_interfaces()),
        }
    }

    /// All corrections accepted: the blend reproduces the high-order flux.
    pub fn ones(mesh: &ColumnMesh) -> Self {
        Self {
            horizontal: EdgeField::uniform(mesh.n_edges(), mesh.n_layers, 1.0),
            vertical: CellField::uniform(mesh.n_cells(), mesh.n_interfaces(), 1.0),
        }
    }

    /// `C = min(R+[receiver], R−[donor])` on every face carrying flux.
    pub fn compute(mesh: &ColumnMesh, antidiffusive: &FluxSet, factors: &CorrectionFactors) -> Self {
        let mut ratios = Self::zeros(mesh);

        ratios.horizontal.fill_columns(|e, column| {
            let edge = mesh.edge(e);
            let Some(right) = edge.right else {
                return;
            };
            for (k, value) in column.iter_mut().enumerate().take(mesh.edge_max_level(e)) {
                let (receiver, donor) = if antidiffusive.horizontal.get(e, k) > 0.0 {
                    (right, edge.left)
                } else {
                    (edge.left, right)
                };
                *value = factors.plus.get(receiver, k).min(factors.minus.get(donor, k));
            }
        });

        ratios.vertical.fill_columns(|c, column| {
            for k in 1..mesh.max_level(c) {
                // Positive flux moves tracer up from layer k into layer k - 1
                let (receiver, donor) = if antidiffusive.vertical.get(c, k) > 0.0 {
                    (k - 1, k)
                } else {
                    (k, k - 1)
                };
                column[k] = factors.plus.get(c, receiver).min(factors.minus.get(c, donor));
            }
        });

        ratios
    }
}

/// Limited fluxes `low + C·A`.
pub fn blend_fluxes(low: &FluxSet, antidiffusive: &FluxSet, ratios: &LimitingRatios) -> FluxSet {
    fn blend<I>(low: &LayeredField<I>, antidiffusive: &LayeredField<I>, ratios: &LayeredField<I>) -> LayeredField<I>
    where
        I: Copy + Into<usize> + From<usize>,
    {
        let data = low
            .data()
            .iter()
            .zip(antidiffusive.data())
            .zip(ratios.data())
            .map(|((f, a), c)| f + c * a)
            .collect();
        LayeredField::from_data(data, low.n_columns(), low.n_levels())
    }

    FluxSet {
        horizontal: blend(&low.horizontal, &antidiffusive.horizontal, &ratios.horizontal),
        vertical: blend(&low.vertical, &antidiffusive.vertical, &ratios.vertical),
    }
}

/// Complete FCT step for one tracer: the limited fluxes.
pub fn limit_fluxes(
    mesh: &ColumnMesh,
    tracer: TracerView<'_>,
    high: &FluxSet,
    low: &FluxSet,
    layer_thickness: &CellField,
    dt: f64,
) -> FluxSet {
    let antidiffusive = antidiffusive_fluxes(high, low);
    let bounds = ControlVolumeBounds::compute(mesh, tracer);
    let factors = CorrectionFactors::compute(
        mesh,
        tracer,
        low,
        &antidiffusive,
        &bounds,
        layer_thickness,
        dt,
    );
    let ratios = LimitingRatios::compute(mesh, &antidiffusive, &factors);
    blend_fluxes(low, &antidiffusive, &ratios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flux::{AdvectionOrder, horizontal_high_order_fluxes, horizontal_upwind_fluxes};
    use crate::solver::state::TracerField;
    use crate::types::{EdgeIndex, TracerIndex};

    #[test]
    fn test_bounds_cover_neighbourhood() {
        let mesh = ColumnMesh::periodic_ring(4, 1.0, 2).with_max_levels(&[2, 2, 1, 2]);
        let values = [[1.0, -3.0], [5.0, 2.0], [0.0, 100.0], [4.0, 9.0]];
        let tracers = TracerField::from_fn(1, 4, 2, |_, c, k| values[c.get()][k]);
        let bounds = ControlVolumeBounds::compute(&mesh, tracers.tracer(TracerIndex::new(0)));

        // Cell 1 layer 0: neighbours 0 and 2 plus layer 1 below
        assert_eq!(bounds.get(CellIndex::new(1), 0), (0.0, 5.0));
        // Cell 1 layer 1: cell 2 is inactive there, so its 100 is ignored
        assert_eq!(bounds.get(CellIndex::new(1), 1), (-3.0, 5.0));
        // Cell 2 layer 0: no layer below
        assert_eq!(bounds.get(CellIndex::new(2), 0), (0.0, 5.0));
    }

    #[test]
    fn test_correction_ratio() {
        assert_eq!(correction_ratio(1.0, 0.0), 1.0);
        assert_eq!(correction_ratio(0.0, 0.0), 1.0);
        assert_eq!(correction_ratio(1.0, 4.0), 0.25);
        assert_eq!(correction_ratio(8.0, 4.0), 1.0);
        assert_eq!(correction_ratio(-1e-17, 4.0), 0.0);
    }

    #[test]
    fn test_blend_endpoints() {
        let mesh = ColumnMesh::periodic_ring(3, 1.0, 2);
        let mut low = FluxSet::zeros(&mesh);
        let mut high = FluxSet::zeros(&mesh);
        low.horizontal.set(EdgeIndex::new(0), 1, 2.0);
        high.horizontal.set(EdgeIndex::new(0), 1, 5.0);
        high.vertical.set(CellIndex::new(1), 1, -1.0);
        let a = antidiffusive_fluxes(&high, &low);

        assert_eq!(blend_fluxes(&low, &a, &LimitingRatios::zeros(&mesh)), low);
        assert_eq!(blend_fluxes(&low, &a, &LimitingRatios::ones(&mesh)), high);
    }

    #[test]
    fn test_face_coefficient_uses_receiver_and_donor() {
        let mesh = ColumnMesh::periodic_ring(3, 1.0, 2);
        let mut a = FluxSet::zeros(&mesh);
        a.horizontal.set(EdgeIndex::new(0), 0, 1.0); // 0 → 1
        a.horizontal.set(EdgeIndex::new(1), 0, -1.0); // 2 → 1
        a.vertical.set(CellIndex::new(2), 1, 1.0); // layer 1 → layer 0
        let factors = CorrectionFactors {
            plus: CellField::from_fn(3, 2, |c, k| [[0.9, 0.8], [0.3, 0.7], [0.6, 0.5]][c.get()][k]),
            minus: CellField::from_fn(3, 2, |c, k| [[0.4, 0.2], [0.1, 1.0], [0.5, 0.35]][c.get()][k]),
        };
        let ratios = LimitingRatios::compute(&mesh, &a, &factors);
        // Receiver 1 (R+ 0.3), donor 0 (R− 0.4)
        assert_eq!(ratios.horizontal.get(EdgeIndex::new(0), 0), 0.3);
        // Receiver 1 (R+ 0.3), donor 2 (R− 0.5)
        assert_eq!(ratios.horizontal.get(EdgeIndex::new(1), 0), 0.3);
        // Receiver layer 0 of cell 2 (R+ 0.6), donor layer 1 (R− 0.35)
        assert_eq!(ratios.vertical.get(CellIndex::new(2), 1), 0.35);
        // Surface interface never carries flux
        assert_eq!(ratios.vertical.get(CellIndex::new(2), 0), 0.0);
    }

    #[test]
    fn test_limited_step_stays_in_bounds() {
        let n = 8;
        let mesh = ColumnMesh::periodic_ring(n, 1.0, 1);
        let values = [0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        let tracers = TracerField::from_fn(1, n, 1, |_, c, _| values[c.get()]);
        let tracer = tracers.tracer(TracerIndex::new(0));
        let uh = EdgeField::uniform(n, 1, 0.8);
        let h = CellField::uniform(n, 1, 1.0);

        let mut low = FluxSet::zeros(&mesh);
        horizontal_upwind_fluxes(&mesh, tracer, &uh, &mut low.horizontal);
        let mut high = FluxSet::zeros(&mesh);
        horizontal_high_order_fluxes(
            &mesh,
            tracer,
            &uh,
            AdvectionOrder::Fourth,
            0.0,
            &mut high.horizontal,
        );
        let limited = limit_fluxes(&mesh, tracer, &high, &low, &h, 1.0);

        for c in CellIndex::iter(n) {
            let updated = values[c.get()] + net_inflow(&mesh, &limited, c, 0);
            assert!((-1e-12..=1.0 + 1e-12).contains(&updated), "cell {}: {}", c, updated);
        }
    }
}
