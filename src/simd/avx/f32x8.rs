//! AVX 8-lane f32 vector holding four interleaved complex values.
//!
//! `F32x8` wraps an `__m256` register. A register loaded from a
//! [`Packed4`](crate::packed::Packed4) holds
//! `[re0, im0, re1, im1, re2, im2, re3, im3]`; pairs 0-1 sit in the lower
//! 128-bit half and pairs 2-3 in the upper half.
//!
//! Every complex shuffle used here (`_mm256_permute_ps`,
//! `_mm256_moveldup_ps`, `_mm256_movehdup_ps`) works within each 128-bit
//! half, and a complex pair never straddles the halves, so no cross-lane
//! permutes are needed.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::traits::{ComplexLanes, SimdLoad, SimdStore};

/// Number of f32 elements in an AVX 256-bit vector.
pub(crate) const LANE_COUNT: usize = 8;

/// `[a1, a0, a3, a2]` in each 128-bit half.
const SWAP_PAIRS: i32 = 0b10_11_00_01;

/// AVX vector of 8 packed f32 lanes (4 complex values).
#[derive(Copy, Clone, Debug)]
pub struct F32x8 {
    pub elements: __m256,
}

impl SimdLoad<f32> for F32x8 {
    type Output = Self;

    /// Loads 8 lanes with `_mm256_loadu_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 8 valid f32 values and the CPU must
    /// support AVX.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm256_loadu_ps(ptr),
        }
    }
}

impl SimdStore<f32> for F32x8 {
    /// Stores 8 lanes with `_mm256_storeu_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 8 writable f32 values.
    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm256_storeu_ps(ptr, self.elements)
    }
}

impl ComplexLanes for F32x8 {
    const COMPLEX_COUNT: usize = LANE_COUNT / 2;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: _mm256_set1_ps(value),
        }
    }

    #[inline(always)]
    unsafe fn splat_real(value: f32) -> Self {
        Self {
            elements: _mm256_setr_ps(value, 0.0, value, 0.0, value, 0.0, value, 0.0),
        }
    }

    #[inline(always)]
    fn swap_pairs(self) -> Self {
        Self {
            elements: unsafe { _mm256_permute_ps(self.elements, SWAP_PAIRS) },
        }
    }

    #[inline(always)]
    fn dup_real(self) -> Self {
        Self {
            elements: unsafe { _mm256_moveldup_ps(self.elements) },
        }
    }

    #[inline(always)]
    fn dup_imag(self) -> Self {
        Self {
            elements: unsafe { _mm256_movehdup_ps(self.elements) },
        }
    }

    #[inline(always)]
    fn conj(self) -> Self {
        Self {
            elements: unsafe {
                let mask = _mm256_setr_ps(0.0, -0.0, 0.0, -0.0, 0.0, -0.0, 0.0, -0.0);
                _mm256_xor_ps(self.elements, mask)
            },
        }
    }

    #[inline(always)]
    fn addsub(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_addsub_ps(self.elements, rhs.elements) },
        }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self {
            elements: unsafe { _mm256_andnot_ps(_mm256_set1_ps(-0.0), self.elements) },
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm256_max_ps(self.elements, rhs.elements) },
        }
    }
}

impl Add for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x8 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_div_ps(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avx_available() -> bool {
        is_x86_feature_detected!("avx")
    }

    fn load(lanes: [f32; 8]) -> F32x8 {
        unsafe { F32x8::load_unaligned(lanes.as_ptr()) }
    }

    fn extract_elements(vec: F32x8) -> [f32; 8] {
        let mut result = [0.0f32; 8];
        unsafe { vec.store_unaligned_at(result.as_mut_ptr()) };
        result
    }

    #[test]
    fn test_shuffles_stay_within_pairs() {
        if !avx_available() {
            return;
        }
        let v = load([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(
            extract_elements(v.swap_pairs()),
            [2.0, 1.0, 4.0, 3.0, 6.0, 5.0, 8.0, 7.0]
        );
        assert_eq!(
            extract_elements(v.dup_real()),
            [1.0, 1.0, 3.0, 3.0, 5.0, 5.0, 7.0, 7.0]
        );
        assert_eq!(
            extract_elements(v.dup_imag()),
            [2.0, 2.0, 4.0, 4.0, 6.0, 6.0, 8.0, 8.0]
        );
    }

    #[test]
    fn test_addsub_and_conj() {
        if !avx_available() {
            return;
        }
        let v = load([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let w = load([1.0; 8]);
        assert_eq!(
            extract_elements(v.addsub(w)),
            [0.0, 3.0, 2.0, 5.0, 4.0, 7.0, 6.0, 9.0]
        );
        assert_eq!(
            extract_elements(v.conj()),
            [1.0, -2.0, 3.0, -4.0, 5.0, -6.0, 7.0, -8.0]
        );
    }

    #[test]
    fn test_cmul_four_pairs() {
        if !avx_available() {
            return;
        }
        // (1+2i)(3+4i) = -5+10i, i*i = -1, 2*(0.5-0.5i) = 1-i, (1+i)(1-i) = 2
        let a = load([1.0, 2.0, 0.0, 1.0, 2.0, 0.0, 1.0, 1.0]);
        let b = load([3.0, 4.0, 0.0, 1.0, 0.5, -0.5, 1.0, -1.0]);
        assert_eq!(
            extract_elements(a.cmul(b)),
            [-5.0, 10.0, -1.0, 0.0, 1.0, -1.0, 2.0, 0.0]
        );
    }

    #[test]
    fn test_recip_upper_half() {
        if !avx_available() {
            return;
        }
        let v = load([1.0, 0.0, 1.0, 0.0, 0.0, 2.0, 4.0, 0.0]);
        let r = extract_elements(v.recip());
        assert_eq!(&r[4..], &[0.0, -0.5, 0.25, 0.0]);
    }

    #[test]
    fn test_recip_large_pair_stays_finite() {
        if !avx_available() {
            return;
        }
        let v = load([1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 3e20, 4e20]);
        let r = extract_elements(v.recip());
        assert!((r[6] * 1e20 - 0.12).abs() < 1e-5);
        assert!((r[7] * 1e20 + 0.16).abs() < 1e-5);
    }
}
