//! Batch equalization over many resource elements.
//!
//! A receiver equalizes every resource element of a slot independently. This
//! module walks slices of channel estimates and received samples, packs them
//! into groups of 4, then 2, and finishes any leftover element with the
//! scalar solver, so each width's kernel is used where it fits.
//!
//! Three strategies mirror each other:
//!
//! - [`Equalize::scalar_equalize`]: one element at a time, generic solver.
//! - [`Equalize::simd_equalize`]: packed groups through [`kernels()`].
//! - [`Equalize::par_simd_equalize`]: the packed path split across rayon
//!   workers once the batch exceeds [`PARALLEL_SIMD_THRESHOLD`].
//!
//! All three produce the same symbols for the same inputs.
//!
//! ```
//! use mimo2x2::{Channel, Complex32, Equalize, Policy, Received, ResourceElements};
//!
//! let one = Complex32::new(1.0, 0.0);
//! let zero = Complex32::new(0.0, 0.0);
//! let channels = vec![Channel::new(one, zero, zero, one); 7];
//! let received = vec![Received::new(one, zero); 7];
//!
//! let res = ResourceElements::new(&channels, &received).unwrap();
//! let symbols = res.simd_equalize(Policy::ZeroForcing, 1.0);
//! assert_eq!(symbols.len(), 7);
//! assert_eq!(symbols[6].x0, one);
//! ```

use rayon::prelude::*;

use crate::complex::Complex32;
use crate::dispatch::{kernels, Kernels};
use crate::error::{validation_error, Result};
use crate::matrix::{Channel, Received, Symbols};
use crate::packed::{Packed2, Packed4};
use crate::solver::{generic, Policy};
use crate::{PARALLEL_CHUNK_SIZE, PARALLEL_SIMD_THRESHOLD};

/// Matching channel estimates and received samples, one per resource element.
#[derive(Copy, Clone, Debug)]
pub struct ResourceElements<'a> {
    channels: &'a [Channel<Complex32>],
    received: &'a [Received<Complex32>],
}

impl<'a> ResourceElements<'a> {
    /// Pairs the two slices.
    ///
    /// Fails with [`crate::MimoError::ValidationError`] when the lengths
    /// differ.
    pub fn new(
        channels: &'a [Channel<Complex32>],
        received: &'a [Received<Complex32>],
    ) -> Result<Self> {
        if channels.len() != received.len() {
            return Err(validation_error(format!(
                "got {} channel estimates for {} received samples",
                channels.len(),
                received.len()
            )));
        }

        Ok(Self { channels, received })
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channels(&self) -> &'a [Channel<Complex32>] {
        self.channels
    }

    pub fn received(&self) -> &'a [Received<Complex32>] {
        self.received
    }

    /// Equalizes into a caller-provided buffer with an explicit kernel table.
    ///
    /// Fails with [`crate::MimoError::ValidationError`] when `out` does not
    /// hold exactly one slot per resource element.
    pub fn equalize_into(
        &self,
        kernels: &Kernels,
        policy: Policy,
        norm: f32,
        out: &mut [Symbols<Complex32>],
    ) -> Result<()> {
        if out.len() != self.len() {
            return Err(validation_error(format!(
                "output holds {} symbol pairs, expected {}",
                out.len(),
                self.len()
            )));
        }

        equalize_block(kernels, self.channels, self.received, policy, norm, out);
        Ok(())
    }
}

/// Batch equalization strategies.
pub trait Equalize {
    type Output;

    /// One resource element at a time with the generic solver.
    fn scalar_equalize(&self, policy: Policy, norm: f32) -> Self::Output;

    /// Packed groups of 4 and 2 through the process-wide kernels.
    fn simd_equalize(&self, policy: Policy, norm: f32) -> Self::Output;

    /// [`Equalize::simd_equalize`] spread over the rayon thread pool.
    fn par_simd_equalize(&self, policy: Policy, norm: f32) -> Self::Output;
}

impl Equalize for ResourceElements<'_> {
    type Output = Vec<Symbols<Complex32>>;

    fn scalar_equalize(&self, policy: Policy, norm: f32) -> Self::Output {
        self.channels
            .iter()
            .zip(self.received)
            .map(|(h, y)| generic::solve(policy, h, y, norm))
            .collect()
    }

    fn simd_equalize(&self, policy: Policy, norm: f32) -> Self::Output {
        let mut out = vec![Symbols::default(); self.len()];
        equalize_block(kernels(), self.channels, self.received, policy, norm, &mut out);
        out
    }

    fn par_simd_equalize(&self, policy: Policy, norm: f32) -> Self::Output {
        // Small batches are not worth the thread pool
        if self.len() <= PARALLEL_SIMD_THRESHOLD {
            return self.simd_equalize(policy, norm);
        }

        let kernels = kernels();
        let mut out = vec![Symbols::default(); self.len()];

        out.par_chunks_mut(PARALLEL_CHUNK_SIZE)
            .zip(self.channels.par_chunks(PARALLEL_CHUNK_SIZE))
            .zip(self.received.par_chunks(PARALLEL_CHUNK_SIZE))
            .for_each(|((out_chunk, h_chunk), y_chunk)| {
                equalize_block(kernels, h_chunk, y_chunk, policy, norm, out_chunk);
            });

        out
    }
}

/// Groups of 4, then at most one group of 2, then at most one scalar.
fn equalize_block(
    kernels: &Kernels,
    channels: &[Channel<Complex32>],
    received: &[Received<Complex32>],
    policy: Policy,
    norm: f32,
    out: &mut [Symbols<Complex32>],
) {
    debug_assert_eq!(channels.len(), received.len());
    debug_assert_eq!(channels.len(), out.len());

    let complete = channels.len() - channels.len() % 4;
    let (h4, h_tail) = channels.split_at(complete);
    let (y4, y_tail) = received.split_at(complete);
    let (out4, out_tail) = out.split_at_mut(complete);

    for ((h, y), x) in h4
        .chunks_exact(4)
        .zip(y4.chunks_exact(4))
        .zip(out4.chunks_exact_mut(4))
    {
        let h = Channel::<Packed4>::pack(&std::array::from_fn(|i| h[i]));
        let y = Received::<Packed4>::pack(&std::array::from_fn(|i| y[i]));
        x.copy_from_slice(&kernels.solve_x4(policy, &h, &y, norm).unpack());
    }

    let mut start = 0;
    if h_tail.len() >= 2 {
        let h = Channel::<Packed2>::pack(&[h_tail[0], h_tail[1]]);
        let y = Received::<Packed2>::pack(&[y_tail[0], y_tail[1]]);
        out_tail[..2].copy_from_slice(&kernels.solve_x2(policy, &h, &y, norm).unpack());
        start = 2;
    }

    for ((h, y), x) in h_tail[start..]
        .iter()
        .zip(&y_tail[start..])
        .zip(&mut out_tail[start..])
    {
        *x = kernels.solve_x1(policy, h, y, norm);
    }
}
