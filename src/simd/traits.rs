use std::ops::{Add, Div, Mul, Sub};

/// Loading packed `f32` lanes into a vector register.
pub trait SimdLoad<T> {
    type Output;

    /// Loads a full register from memory with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a full register's worth of valid `T` values and the
    /// running CPU must support the instruction set of the implementing type.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;
}

/// Storing a vector register back to packed `f32` lanes.
pub trait SimdStore<T> {
    /// Stores a full register to memory with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a full register's worth of writable `T` values.
    unsafe fn store_unaligned_at(&self, ptr: *mut T);
}

/// Complex arithmetic on interleaved `(re, im)` lane pairs.
///
/// A register holds `COMPLEX_COUNT` complex values, value `k` in lanes
/// `2k` (real) and `2k + 1` (imaginary). Every operation works on each pair
/// independently; nothing moves data between pairs, which is what keeps
/// instance `k` of the input in instance `k` of the output.
///
/// The element-wise `+ - * /` operators act on raw lanes, so `+` and `-`
/// are complex addition/subtraction while `*` and `/` are not complex
/// products; use [`ComplexLanes::cmul`] for those.
///
/// Values of an implementing type can only be created through `unsafe`
/// constructors whose contract requires the matching CPU feature, so the
/// safe methods below may assume the feature is present.
pub trait ComplexLanes:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    /// Number of complex values per register.
    const COMPLEX_COUNT: usize;

    /// Broadcasts `value` to every lane.
    ///
    /// # Safety
    ///
    /// The running CPU must support the implementing type's instruction set.
    unsafe fn splat(value: f32) -> Self;

    /// Broadcasts the complex value `(value, 0)` to every pair.
    ///
    /// # Safety
    ///
    /// The running CPU must support the implementing type's instruction set.
    unsafe fn splat_real(value: f32) -> Self;

    /// Swaps real and imaginary lanes: `(re, im) -> (im, re)`.
    fn swap_pairs(self) -> Self;

    /// Duplicates the real lane: `(re, im) -> (re, re)`.
    fn dup_real(self) -> Self;

    /// Duplicates the imaginary lane: `(re, im) -> (im, im)`.
    fn dup_imag(self) -> Self;

    /// Negates the imaginary lanes.
    fn conj(self) -> Self;

    /// Subtracts on even (real) lanes, adds on odd (imaginary) lanes.
    fn addsub(self, rhs: Self) -> Self;

    /// Clears the sign bit of every lane.
    fn abs(self) -> Self;

    /// Lane-wise maximum.
    fn max(self, rhs: Self) -> Self;

    /// Complex product `self * rhs` per pair.
    ///
    /// `(a+bi)(c+di) = (ac-bd) + (bc+ad)i`:
    /// `[a, b] * [c, c]` gives `[ac, bc]`, `[b, a] * [d, d]` gives `[bd, ad]`,
    /// and `addsub` combines them.
    #[inline(always)]
    fn cmul(self, rhs: Self) -> Self {
        let re = self * rhs.dup_real();
        let im = self.swap_pairs() * rhs.dup_imag();
        re.addsub(im)
    }

    /// `conj(self) * rhs` per pair.
    #[inline(always)]
    fn conj_mul(self, rhs: Self) -> Self {
        self.conj().cmul(rhs)
    }

    /// `|z|^2` broadcast to both lanes of each pair.
    #[inline(always)]
    fn norm_sqr(self) -> Self {
        let squares = self * self;
        squares + squares.swap_pairs()
    }

    /// Complex reciprocal `conj(z) / |z|^2` per pair, with exact division.
    ///
    /// Each pair is pre-scaled by `max(|re|, |im|)` and divided by it again
    /// afterwards, matching [`crate::complex::recip`] lane for lane. A zero
    /// pair yields NaN lanes.
    #[inline(always)]
    fn recip(self) -> Self {
        let magnitude = self.abs();
        let m = magnitude.max(magnitude.swap_pairs());
        let scaled = self / m;
        scaled.conj() / scaled.norm_sqr() / m
    }

    /// Multiplies every lane by the real `factor`.
    #[inline(always)]
    fn scale(self, factor: f32) -> Self {
        // SAFETY: `self` exists, so the instruction set is available.
        self * unsafe { Self::splat(factor) }
    }

    /// Adds the real `value` to every pair.
    #[inline(always)]
    fn add_real(self, value: f32) -> Self {
        // SAFETY: `self` exists, so the instruction set is available.
        self + unsafe { Self::splat_real(value) }
    }
}
