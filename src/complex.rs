//! Scalar complex arithmetic.
//!
//! Samples are `num::complex::Complex32`, a `#[repr(C)]` pair `(re, im)`.
//! Addition, subtraction and multiplication come straight from `num`:
//!
//! - multiply: `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`
//!
//! Division is routed through [`recip`] so the scalar path performs the same
//! operation sequence as the packed kernels: `a / b = a * conj(b) / |b|^2`,
//! with `b` pre-scaled by its largest component so `|b|^2` neither overflows
//! nor underflows. Dividing by zero yields NaN/Inf per IEEE semantics; it is
//! never reported as an error.

pub use num::complex::Complex32;

/// Complex reciprocal `conj(a) / |a|^2`.
///
/// `a` is first divided by `m = max(|re|, |im|)` and the result divided by
/// `m` again, so any finite non-zero `a` has a finite non-zero reciprocal.
/// Returns NaN components when `a == 0`.
#[inline(always)]
pub fn recip(a: Complex32) -> Complex32 {
    let m = a.re.abs().max(a.im.abs());
    let (re, im) = (a.re / m, a.im / m);
    let norm = re * re + im * im;
    Complex32::new(re / norm / m, -im / norm / m)
}

/// Complex division `a / b` through the reciprocal of `b`.
#[inline(always)]
pub fn div(a: Complex32, b: Complex32) -> Complex32 {
    a * recip(b)
}

/// Multiplies `a` by a real factor.
#[inline(always)]
pub fn scale(a: Complex32, factor: f32) -> Complex32 {
    Complex32::new(a.re * factor, a.im * factor)
}

/// Squared euclidean distance between two sequences of complex samples.
///
/// Used as the error energy `sum |a_i - b_i|^2` when comparing recovered
/// symbols against ground truth.
pub fn error_energy(a: &[Complex32], b: &[Complex32]) -> f32 {
    debug_assert_eq!(a.len(), b.len(), "Sequences must be the same length");

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm_sqr())
        .sum()
}
