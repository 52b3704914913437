//! SSE 4-lane f32 vector holding two interleaved complex values.
//!
//! `F32x4` wraps an `__m128` register. Lane order follows memory order, so a
//! register loaded from a [`Packed2`](crate::packed::Packed2) holds
//! `[re0, im0, re1, im1]`.
//!
//! Only SSE (SSE1) instructions are used: the real/imaginary shuffles go
//! through `_mm_shuffle_ps` and the alternating subtract/add is emulated with
//! a sign-bit XOR instead of SSE3's `_mm_addsub_ps`.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::traits::{ComplexLanes, SimdLoad, SimdStore};

/// Number of f32 elements in an SSE 128-bit vector.
pub(crate) const LANE_COUNT: usize = 4;

/// `_MM_SHUFFLE(2, 3, 0, 1)`: `[a1, a0, a3, a2]`.
const SWAP_PAIRS: i32 = 0b10_11_00_01;

/// `_MM_SHUFFLE(2, 2, 0, 0)`: `[a0, a0, a2, a2]`.
const DUP_EVEN: i32 = 0b10_10_00_00;

/// `_MM_SHUFFLE(3, 3, 1, 1)`: `[a1, a1, a3, a3]`.
const DUP_ODD: i32 = 0b11_11_01_01;

/// SSE vector of 4 packed f32 lanes (2 complex values).
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: __m128,
}

impl SimdLoad<f32> for F32x4 {
    type Output = Self;

    /// Loads 4 lanes with `_mm_loadu_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 4 valid f32 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: _mm_loadu_ps(ptr),
        }
    }
}

impl SimdStore<f32> for F32x4 {
    /// Stores 4 lanes with `_mm_storeu_ps`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 4 writable f32 values.
    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        _mm_storeu_ps(ptr, self.elements)
    }
}

impl ComplexLanes for F32x4 {
    const COMPLEX_COUNT: usize = LANE_COUNT / 2;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: _mm_set1_ps(value),
        }
    }

    #[inline(always)]
    unsafe fn splat_real(value: f32) -> Self {
        Self {
            elements: _mm_setr_ps(value, 0.0, value, 0.0),
        }
    }

    #[inline(always)]
    fn swap_pairs(self) -> Self {
        Self {
            elements: unsafe { _mm_shuffle_ps(self.elements, self.elements, SWAP_PAIRS) },
        }
    }

    #[inline(always)]
    fn dup_real(self) -> Self {
        Self {
            elements: unsafe { _mm_shuffle_ps(self.elements, self.elements, DUP_EVEN) },
        }
    }

    #[inline(always)]
    fn dup_imag(self) -> Self {
        Self {
            elements: unsafe { _mm_shuffle_ps(self.elements, self.elements, DUP_ODD) },
        }
    }

    #[inline(always)]
    fn conj(self) -> Self {
        Self {
            elements: unsafe { _mm_xor_ps(self.elements, _mm_setr_ps(0.0, -0.0, 0.0, -0.0)) },
        }
    }

    #[inline(always)]
    fn addsub(self, rhs: Self) -> Self {
        // Flip the sign of the even lanes of rhs, then add.
        Self {
            elements: unsafe {
                let negated = _mm_xor_ps(rhs.elements, _mm_setr_ps(-0.0, 0.0, -0.0, 0.0));
                _mm_add_ps(self.elements, negated)
            },
        }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self {
            elements: unsafe { _mm_andnot_ps(_mm_set1_ps(-0.0), self.elements) },
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { _mm_max_ps(self.elements, rhs.elements) },
        }
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_add_ps(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_sub_ps(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_mul_ps(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm_div_ps(self.elements, rhs.elements) },
        }
    }
}
