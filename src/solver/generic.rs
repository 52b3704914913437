//! Scalar (width 1) Zero-Forcing and MMSE solvers.
//!
//! These are the reference implementations: every vector kernel must agree
//! with them per instance up to floating-point rounding. The `*_packed`
//! variants apply the scalar solver lane by lane and serve as the portable
//! implementation of any packed width.

use crate::complex::{recip, scale, Complex32};
use crate::matrix::{Channel, Received, Symbols};
use crate::packed::Packed;
use crate::solver::Policy;

/// Zero-Forcing solve `x = norm * H^-1 y` for one resource element.
///
/// `H^-1 = 1/det * [[h11, -h01], [-h10, h00]]`. A singular `H` produces
/// non-finite symbols.
#[inline(always)]
pub fn zf(h: &Channel<Complex32>, y: &Received<Complex32>, norm: f32) -> Symbols<Complex32> {
    let det = h.h00 * h.h11 - h.h01 * h.h10;
    let s = scale(recip(det), norm);

    Symbols {
        x0: (h.h11 * y.y0 - h.h01 * y.y1) * s,
        x1: (h.h00 * y.y1 - h.h10 * y.y0) * s,
    }
}

/// MMSE solve of `(H^H H + n0 I) x = H^H y`, scaled by `norm`.
///
/// The Gram matrix is Hermitian positive-definite for `n0 > 0`, so the
/// inversion cannot hit a zero determinant. With `n0 == 0` and a singular
/// `H` the result is non-finite, exactly like Zero-Forcing.
#[inline(always)]
pub fn mmse(
    h: &Channel<Complex32>,
    y: &Received<Complex32>,
    noise_estimate: f32,
    norm: f32,
) -> Symbols<Complex32> {
    let c00 = h.h00.conj();
    let c01 = h.h01.conj();
    let c10 = h.h10.conj();
    let c11 = h.h11.conj();
    let n0 = Complex32::new(noise_estimate, 0.0);

    // A = H^H H + n0 I
    let a00 = c00 * h.h00 + c10 * h.h10 + n0;
    let a01 = c00 * h.h01 + c10 * h.h11;
    let a10 = c01 * h.h00 + c11 * h.h10;
    let a11 = c01 * h.h01 + c11 * h.h11 + n0;

    // z = H^H y
    let z0 = c00 * y.y0 + c10 * y.y1;
    let z1 = c01 * y.y0 + c11 * y.y1;

    let det = a00 * a11 - a01 * a10;
    let s = scale(recip(det), norm);

    Symbols {
        x0: (a11 * z0 - a01 * z1) * s,
        x1: (a00 * z1 - a10 * z0) * s,
    }
}

/// Solves one resource element with the given policy.
#[inline(always)]
pub fn solve(
    policy: Policy,
    h: &Channel<Complex32>,
    y: &Received<Complex32>,
    norm: f32,
) -> Symbols<Complex32> {
    match policy {
        Policy::ZeroForcing => zf(h, y, norm),
        Policy::Mmse { noise_estimate } => mmse(h, y, noise_estimate, norm),
    }
}

/// Zero-Forcing over `W` packed instances, one instance at a time.
pub fn zf_packed<const W: usize>(
    h: &Channel<Packed<W>>,
    y: &Received<Packed<W>>,
    norm: f32,
) -> Symbols<Packed<W>> {
    let xs: [Symbols<Complex32>; W] =
        std::array::from_fn(|i| zf(&h.instance(i), &y.instance(i), norm));
    Symbols::pack(&xs)
}

/// MMSE over `W` packed instances, one instance at a time.
pub fn mmse_packed<const W: usize>(
    h: &Channel<Packed<W>>,
    y: &Received<Packed<W>>,
    noise_estimate: f32,
    norm: f32,
) -> Symbols<Packed<W>> {
    let xs: [Symbols<Complex32>; W] =
        std::array::from_fn(|i| mmse(&h.instance(i), &y.instance(i), noise_estimate, norm));
    Symbols::pack(&xs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f32, im: f32) -> Complex32 {
        Complex32::new(re, im)
    }

    fn assert_symbols_close(a: &Symbols<Complex32>, b: &Symbols<Complex32>, tol: f32) {
        let err = (a.x0 - b.x0).norm_sqr() + (a.x1 - b.x1).norm_sqr();
        assert!(err < tol, "error energy {err:.3e} >= {tol:.1e}: {a:?} vs {b:?}");
    }

    #[test]
    fn test_zf_identity_channel() {
        let h = Channel::new(c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0));
        let y = Received::new(c(0.5, -0.5), c(-1.0, 2.0));
        let x = zf(&h, &y, 1.0);
        assert_symbols_close(&x, &Symbols::new(y.y0, y.y1), 1e-12);
    }

    #[test]
    fn test_zf_applies_norm() {
        let h = Channel::new(c(2.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 1.0));
        let y = Received::new(c(2.0, 0.0), c(0.0, 3.0));
        // x = [1, 3] before scaling
        let x = zf(&h, &y, 0.5);
        assert_symbols_close(&x, &Symbols::new(c(0.5, 0.0), c(1.5, 0.0)), 1e-12);
    }

    #[test]
    fn test_zf_recovers_transmitted() {
        let h = Channel::new(c(0.8, 0.1), c(-0.3, 0.5), c(0.2, -0.6), c(1.1, 0.4));
        let x = Symbols::new(c(0.7, -0.7), c(-0.7, -0.7));
        let y = h.apply(&x);
        assert_symbols_close(&zf(&h, &y, 1.0), &x, 1e-9);
    }

    #[test]
    fn test_zf_singular_is_not_finite() {
        let h = Channel::new(c(1.0, 1.0), c(2.0, 2.0), c(0.5, 0.5), c(1.0, 1.0));
        let y = Received::new(c(1.0, 0.0), c(0.0, 1.0));
        assert!(!zf(&h, &y, 1.0).is_finite());
    }

    #[test]
    fn test_mmse_zero_noise_matches_zf() {
        let h = Channel::new(c(0.8, 0.1), c(-0.3, 0.5), c(0.2, -0.6), c(1.1, 0.4));
        let y = Received::new(c(0.3, 0.9), c(-1.2, 0.2));
        assert_symbols_close(&mmse(&h, &y, 0.0, 1.0), &zf(&h, &y, 1.0), 1e-8);
    }

    #[test]
    fn test_mmse_regularizes_singular_channel() {
        let h = Channel::new(c(1.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(1.0, 0.0));
        let y = Received::new(c(1.0, 0.0), c(1.0, 0.0));
        let x = mmse(&h, &y, 0.1, 1.0);
        assert!(x.is_finite());
        // Symmetric channel, symmetric estimate.
        assert!((x.x0 - x.x1).norm() < 1e-6);
    }

    #[test]
    fn test_mmse_singular_zero_noise_is_not_finite() {
        let h = Channel::new(c(1.0, 0.0), c(2.0, 0.0), c(2.0, 0.0), c(4.0, 0.0));
        let y = Received::new(c(1.0, 0.0), c(2.0, 0.0));
        assert!(!mmse(&h, &y, 0.0, 1.0).is_finite());
    }

    #[test]
    fn test_mmse_diagonal_closed_form() {
        // Diagonal real channel: x_i = h_i * y_i / (h_i^2 + n0)
        let h = Channel::new(c(2.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0));
        let y = Received::new(c(1.0, 0.0), c(1.0, 0.0));
        let n0 = 0.5;
        let x = mmse(&h, &y, n0, 1.0);
        assert_symbols_close(
            &x,
            &Symbols::new(c(2.0 / 4.5, 0.0), c(1.0 / 1.5, 0.0)),
            1e-12,
        );
    }

    #[test]
    fn test_solve_dispatches_policy() {
        let h = Channel::new(c(0.9, 0.0), c(0.1, 0.2), c(-0.2, 0.1), c(1.0, -0.3));
        let y = Received::new(c(0.5, 0.5), c(-0.5, 0.5));
        assert_eq!(solve(Policy::ZeroForcing, &h, &y, 1.0), zf(&h, &y, 1.0));
        assert_eq!(
            solve(Policy::mmse(0.05), &h, &y, 2.0),
            mmse(&h, &y, 0.05, 2.0)
        );
    }

    #[test]
    fn test_packed_matches_scalar_per_instance() {
        let hs = [
            Channel::new(c(0.9, 0.0), c(0.1, 0.2), c(-0.2, 0.1), c(1.0, -0.3)),
            Channel::new(c(0.3, 0.4), c(-0.5, 0.2), c(0.6, 0.6), c(0.2, -0.9)),
        ];
        let ys = [
            Received::new(c(0.5, 0.5), c(-0.5, 0.5)),
            Received::new(c(1.0, 0.0), c(0.0, -1.0)),
        ];
        let x = zf_packed(&Channel::pack(&hs), &Received::pack(&ys), 1.0).unpack();
        let xm = mmse_packed(&Channel::pack(&hs), &Received::pack(&ys), 0.1, 1.0).unpack();

        for i in 0..2 {
            assert_eq!(x[i], zf(&hs[i], &ys[i], 1.0));
            assert_eq!(xm[i], mmse(&hs[i], &ys[i], 0.1, 1.0));
        }
    }
}
