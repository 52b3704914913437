//! Equalization policies for the 2x2 system `y = H x`.
//!
//! - **Zero-Forcing** inverts `H` exactly: `x = norm * H^-1 y`. Only defined
//!   for non-singular channels; a singular `H` yields NaN/Inf.
//! - **MMSE** solves the regularized system `(H^H H + n0 I) x = H^H y` and
//!   scales by `norm`. It reduces to Zero-Forcing as `n0 -> 0`.
//!
//! The [`generic`] module holds the scalar reference implementations plus a
//! lane-wise implementation of every packed width. The vectorized kernels
//! live under [`crate::simd`] and are selected through [`crate::dispatch`].

pub mod generic;

/// Equalization policy applied to a resource element.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Policy {
    /// Exact channel inversion, noise ignored.
    ZeroForcing,
    /// Regularized inversion with noise-variance estimate `n0 >= 0`.
    Mmse { noise_estimate: f32 },
}

impl Policy {
    pub fn mmse(noise_estimate: f32) -> Self {
        Policy::Mmse { noise_estimate }
    }
}
