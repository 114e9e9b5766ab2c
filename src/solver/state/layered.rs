//! Per-column layered storage for edge and cell quantities.
//!
//! A [`LayeredField`] stores `n_levels` values for each of `n_columns`
//! columns, contiguous per column. The column type parameter records what
//! the columns are (cells or edges) so that, for example, a normal velocity
//! on edges cannot be passed where a layer thickness on cells is expected.

use std::marker::PhantomData;

use crate::types::{CellIndex, EdgeIndex};

/// Column-major layered field indexed by a typed column index.
#[derive(Clone, Debug, PartialEq)]
pub struct LayeredField<I> {
    data: Vec<f64>,
    n_columns: usize,
    n_levels: usize,
    _index: PhantomData<fn() -> I>,
}

/// Cell × level field (layer thickness, vertical velocity, interface fluxes).
pub type CellField = LayeredField<CellIndex>;

/// Edge × layer field (normal thickness flux, horizontal edge fluxes).
pub type EdgeField = LayeredField<EdgeIndex>;

impl<I> LayeredField<I>
where
    I: Copy + Into<usize> + From<usize>,
{
    /// Create a zero-initialised field.
    pub fn new(n_columns: usize, n_levels: usize) -> Self {
        Self::uniform(n_columns, n_levels, 0.0)
    }

    /// Create a field with every entry set to `value`.
    pub fn uniform(n_columns: usize, n_levels: usize, value: f64) -> Self {
        Self {
            data: vec![value; n_columns * n_levels],
            n_columns,
            n_levels,
            _index: PhantomData,
        }
    }

    /// Wrap existing column-major data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != n_columns * n_levels`.
    pub fn from_data(data: Vec<f64>, n_columns: usize, n_levels: usize) -> Self {
        assert_eq!(
            data.len(),
            n_columns * n_levels,
            "layered field data has wrong length"
        );
        Self {
            data,
            n_columns,
            n_levels,
            _index: PhantomData,
        }
    }

    /// Build a field from a function of (column, level).
    pub fn from_fn(n_columns: usize, n_levels: usize, f: impl Fn(I, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n_columns * n_levels);
        for col in 0..n_columns {
            for level in 0..n_levels {
                data.push(f(I::from(col), level));
            }
        }
        Self::from_data(data, n_columns, n_levels)
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    #[inline]
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    #[inline]
    pub fn get(&self, col: I, level: usize) -> f64 {
        debug_assert!(level < self.n_levels);
        self.data[col.into() * self.n_levels + level]
    }

    #[inline]
    pub fn set(&mut self, col: I, level: usize, value: f64) {
        debug_assert!(level < self.n_levels);
        self.data[col.into() * self.n_levels + level] = value;
    }

    /// All levels of one column.
    #[inline]
    pub fn column(&self, col: I) -> &[f64] {
        let start = col.into() * self.n_levels;
        &self.data[start..start + self.n_levels]
    }

    /// Raw column-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Whether this field has the given shape.
    pub fn has_shape(&self, n_columns: usize, n_levels: usize) -> bool {
        self.n_columns == n_columns && self.n_levels == n_levels
    }

    /// Fill every column through `f(column, levels)`.
    ///
    /// Columns are disjoint, so with the `parallel` feature they are
    /// filled concurrently; the result does not depend on scheduling.
    pub fn fill_columns<F>(&mut self, f: F)
    where
        F: Fn(I, &mut [f64]) + Send + Sync,
    {
        let n_levels = self.n_levels;
        if n_levels == 0 {
            return;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.data
                .par_chunks_mut(n_levels)
                .enumerate()
                .for_each(|(col, levels)| f(I::from(col), levels));
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.data
                .chunks_mut(n_levels)
                .enumerate()
                .for_each(|(col, levels)| f(I::from(col), levels));
        }
    }

    /// Fill two equally shaped fields in one pass through
    /// `f(column, first_levels, second_levels)`.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn fill_column_pairs<F>(first: &mut Self, second: &mut Self, f: F)
    where
        F: Fn(I, &mut [f64], &mut [f64]) + Send + Sync,
    {
        assert!(
            second.has_shape(first.n_columns, first.n_levels),
            "cannot fill fields of different shape together"
        );
        let n_levels = first.n_levels;
        if n_levels == 0 {
            return;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            first
                .data
                .par_chunks_mut(n_levels)
                .zip(second.data.par_chunks_mut(n_levels))
                .enumerate()
                .for_each(|(col, (a, b))| f(I::from(col), a, b));
        }

        #[cfg(not(feature = "parallel"))]
        {
            first
                .data
                .chunks_mut(n_levels)
                .zip(second.data.chunks_mut(n_levels))
                .enumerate()
                .for_each(|(col, (a, b))| f(I::from(col), a, b));
        }
    }

    /// Elementwise `self - other`.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn difference(&self, other: &Self) -> Self {
        assert!(
            other.has_shape(self.n_columns, self.n_levels),
            "cannot subtract fields of different shape"
        );
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a - b)
            .collect();
        Self::from_data(data, self.n_columns, self.n_levels)
    }
}
