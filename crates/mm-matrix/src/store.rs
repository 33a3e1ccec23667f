use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MatrixError, Result};
use crate::matrix::{Element, Matrix};
use crate::verify::verify;

/// Exclusive upper bound of the values written by [`MatrixStore::initialize`].
pub const INPUT_VALUE_BOUND: Element = 100;

/// Owns every matrix used by a benchmark run.
///
/// All four matrices are allocated once with the same dimension and reused
/// for every strategy invocation:
///   - `a`, `b`: inputs, written only by `initialize`
///   - `output`: target of the strategy under test
///   - `reference`: serial result, computed once and frozen
#[derive(Debug)]
pub struct MatrixStore {
    a: Matrix,
    b: Matrix,
    output: Matrix,
    reference: Matrix,
    reference_ready: bool,
}

impl MatrixStore {
    /// Allocate zero-filled inputs, output and reference of dimension `dim`.
    pub fn allocate(dim: usize) -> Result<Self> {
        let store = MatrixStore {
            a: Matrix::zeros(dim)?,
            b: Matrix::zeros(dim)?,
            output: Matrix::zeros(dim)?,
            reference: Matrix::zeros(dim)?,
            reference_ready: false,
        };
        debug!("allocated matrix store, dim={}", dim);
        Ok(store)
    }

    pub fn dim(&self) -> usize {
        self.a.dim()
    }

    /// Fill both inputs with values in `[0, INPUT_VALUE_BOUND)` from a seeded RNG.
    ///
    /// Cells are drawn alternately for `a` and `b` in row-major order, so the
    /// same seed and dimension always produce the same inputs.
    pub fn initialize(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for (x, y) in self
            .a
            .as_mut_slice()
            .iter_mut()
            .zip(self.b.as_mut_slice().iter_mut())
        {
            *x = rng.gen_range(0..INPUT_VALUE_BOUND);
            *y = rng.gen_range(0..INPUT_VALUE_BOUND);
        }
        debug!("initialized inputs, seed={}", seed);
    }

    /// Zero the output matrix.
    pub fn reset_output(&mut self) {
        self.output.fill(0);
    }

    pub fn a(&self) -> &Matrix {
        &self.a
    }

    pub fn b(&self) -> &Matrix {
        &self.b
    }

    pub fn output(&self) -> &Matrix {
        &self.output
    }

    /// Borrow the inputs read-only and the output mutably for one strategy run.
    pub fn operands(&mut self) -> (&Matrix, &Matrix, &mut Matrix) {
        (&self.a, &self.b, &mut self.output)
    }

    /// Fill the reference output with `compute`, once per store.
    ///
    /// `compute` receives the two inputs and the reference matrix. The
    /// reference is frozen only if `compute` succeeds.
    ///
    /// # Errors
    /// Returns `ReferenceFrozen` (converted into `E`) if the reference has
    /// already been computed, or whatever `compute` returns.
    pub fn compute_reference<E, F>(&mut self, compute: F) -> std::result::Result<(), E>
    where
        F: FnOnce(&Matrix, &Matrix, &mut Matrix) -> std::result::Result<(), E>,
        E: From<MatrixError>,
    {
        if self.reference_ready {
            return Err(MatrixError::ReferenceFrozen.into());
        }
        compute(&self.a, &self.b, &mut self.reference)?;
        self.reference_ready = true;
        Ok(())
    }

    /// Returns the frozen reference output.
    pub fn reference(&self) -> Result<&Matrix> {
        if !self.reference_ready {
            return Err(MatrixError::MissingReference);
        }
        Ok(&self.reference)
    }

    /// Verify the current output against the reference.
    pub fn verify(&self) -> Result<()> {
        verify(&self.output, self.reference()?)
    }
}
