//! Multi-tracer concentration storage.
//!
//! Tracers are stored as concentrations (not layer-thickness × C) indexed
//! by (tracer, cell, layer). One tracer occupies a contiguous block so the
//! kernels can work on a single tracer through a [`TracerView`].

use crate::types::{CellIndex, TracerIndex};

/// Concentration (or concentration tendency) of a group of tracers.
#[derive(Clone, Debug, PartialEq)]
pub struct TracerField {
    /// Values in layout `[(tracer * n_cells + cell) * n_layers + layer]`
    pub data: Vec<f64>,
    /// Number of tracers in the group
    pub n_tracers: usize,
    /// Number of cells (including halo cells)
    pub n_cells: usize,
    /// Number of layers per column
    pub n_layers: usize,
}

impl TracerField {
    /// Create a zero-initialised field.
    pub fn new(n_tracers: usize, n_cells: usize, n_layers: usize) -> Self {
        Self::uniform(n_tracers, n_cells, n_layers, 0.0)
    }

    /// Create a field holding the same value everywhere.
    pub fn uniform(n_tracers: usize, n_cells: usize, n_layers: usize, value: f64) -> Self {
        Self {
            data: vec![value; n_tracers * n_cells * n_layers],
            n_tracers,
            n_cells,
            n_layers,
        }
    }

    /// Build a field from a function of (tracer, cell, layer).
    pub fn from_fn(
        n_tracers: usize,
        n_cells: usize,
        n_layers: usize,
        f: impl Fn(TracerIndex, CellIndex, usize) -> f64,
    ) -> Self {
        let mut field = Self::new(n_tracers, n_cells, n_layers);
        for t in TracerIndex::iter(n_tracers) {
            for c in CellIndex::iter(n_cells) {
                for k in 0..n_layers {
                    field.set(t, c, k, f(t, c, k));
                }
            }
        }
        field
    }

    #[inline]
    fn offset(&self, t: TracerIndex, c: CellIndex, k: usize) -> usize {
        debug_assert!(k < self.n_layers);
        (t.as_usize() * self.n_cells + c.as_usize()) * self.n_layers + k
    }

    #[inline]
    pub fn get(&self, t: TracerIndex, c: CellIndex, k: usize) -> f64 {
        self.data[self.offset(t, c, k)]
    }

    #[inline]
    pub fn set(&mut self, t: TracerIndex, c: CellIndex, k: usize, value: f64) {
        let i = self.offset(t, c, k);
        self.data[i] = value;
    }

    /// Whether this field has the given shape.
    pub fn has_shape(&self, n_tracers: usize, n_cells: usize, n_layers: usize) -> bool {
        self.n_tracers == n_tracers && self.n_cells == n_cells && self.n_layers == n_layers
    }

    /// Read-only view of one tracer.
    pub fn tracer(&self, t: TracerIndex) -> TracerView<'_> {
        let block = self.n_cells * self.n_layers;
        let start = t.as_usize() * block;
        TracerView {
            values: &self.data[start..start + block],
            n_layers: self.n_layers,
        }
    }

    /// Mutable cell-major slice of one tracer, `n_layers` values per cell.
    pub fn tracer_mut(&mut self, t: TracerIndex) -> &mut [f64] {
        let block = self.n_cells * self.n_layers;
        let start = t.as_usize() * block;
        &mut self.data[start..start + block]
    }

    /// Add `other` into `self` elementwise.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn accumulate(&mut self, other: &TracerField) {
        assert!(
            other.has_shape(self.n_tracers, self.n_cells, self.n_layers),
            "cannot accumulate tracer fields of different shape"
        );
        for (a, b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
    }
}

/// Borrowed single-tracer values, `n_layers` per cell.
#[derive(Clone, Copy, Debug)]
pub struct TracerView<'a> {
    values: &'a [f64],
    n_layers: usize,
}

impl<'a> TracerView<'a> {
    /// Wrap a cell-major slice.
    pub fn new(values: &'a [f64], n_layers: usize) -> Self {
        debug_assert!(n_layers == 0 || values.len() % n_layers == 0);
        Self { values, n_layers }
    }

    #[inline]
    pub fn get(&self, c: CellIndex, k: usize) -> f64 {
        self.values[c.as_usize() * self.n_layers + k]
    }

    /// All layers of one column.
    #[inline]
    pub fn column(&self, c: CellIndex) -> &'a [f64] {
        let start = c.as_usize() * self.n_layers;
        &self.values[start..start + self.n_layers]
    }

    #[inline]
    pub fn n_layers(&self) -> usize {
        self.n_layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(i: usize) -> TracerIndex {
        TracerIndex::new(i)
    }

    fn c(i: usize) -> CellIndex {
        CellIndex::new(i)
    }

    #[test]
    fn test_layout_is_tracer_major() {
        let field = TracerField::from_fn(2, 3, 4, |t, c, k| {
            (t.get() * 100 + c.get() * 10 + k) as f64
        });
        assert_eq!(field.get(t(1), c(2), 3), 123.0);
        assert_eq!(field.data[(3 + 2) * 4 + 3], 123.0);
    }

    #[test]
    fn test_tracer_view() {
        let field = TracerField::from_fn(2, 3, 2, |t, c, k| {
            (t.get() * 100 + c.get() * 10 + k) as f64
        });
        let view = field.tracer(t(1));
        assert_eq!(view.get(c(0), 1), 101.0);
        assert_eq!(view.column(c(2)), &[120.0, 121.0]);
        assert_eq!(view.n_layers(), 2);
    }

    #[test]
    fn test_tracer_mut_touches_only_one_tracer() {
        let mut field = TracerField::new(2, 2, 2);
        field.tracer_mut(t(0)).iter_mut().for_each(|v| *v = 1.0);
        assert!(field.tracer(t(0)).column(c(1)).iter().all(|&v| v == 1.0));
        assert!(field.tracer(t(1)).column(c(1)).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_accumulate() {
        let mut a = TracerField::uniform(1, 2, 2, 1.0);
        let b = TracerField::uniform(1, 2, 2, 0.5);
        a.accumulate(&b);
        a.accumulate(&b);
        assert!(a.data.iter().all(|&v| v == 2.0));
    }
}
