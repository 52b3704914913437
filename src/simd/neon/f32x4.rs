//! NEON 4-lane f32 vectors holding interleaved complex values.
//!
//! [`F32x4`] wraps one `float32x4_t` (two complex values). [`F32x4x2`]
//! pairs two of them to carry four complex values, lower register first, so
//! a width-4 group keeps the same memory-order lane layout as on AVX.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use std::ops::{Add, Div, Mul, Sub};

use crate::simd::traits::{ComplexLanes, SimdLoad, SimdStore};

/// Number of f32 elements in a NEON 128-bit vector.
pub(crate) const LANE_COUNT: usize = 4;

const CONJ_SIGNS: [f32; 4] = [1.0, -1.0, 1.0, -1.0];

const ADDSUB_SIGNS: [f32; 4] = [-1.0, 1.0, -1.0, 1.0];

/// NEON vector of 4 packed f32 lanes (2 complex values).
#[derive(Copy, Clone, Debug)]
pub struct F32x4 {
    pub elements: float32x4_t,
}

impl SimdLoad<f32> for F32x4 {
    type Output = Self;

    /// Loads 4 lanes with `vld1q_f32`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 4 valid f32 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        Self {
            elements: vld1q_f32(ptr),
        }
    }
}

impl SimdStore<f32> for F32x4 {
    /// Stores 4 lanes with `vst1q_f32`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least 4 writable f32 values.
    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        debug_assert!(!ptr.is_null(), "Pointer must not be null");

        vst1q_f32(ptr, self.elements)
    }
}

impl ComplexLanes for F32x4 {
    const COMPLEX_COUNT: usize = LANE_COUNT / 2;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self {
            elements: vdupq_n_f32(value),
        }
    }

    #[inline(always)]
    unsafe fn splat_real(value: f32) -> Self {
        let lanes = [value, 0.0, value, 0.0];
        Self {
            elements: vld1q_f32(lanes.as_ptr()),
        }
    }

    #[inline(always)]
    fn swap_pairs(self) -> Self {
        Self {
            elements: unsafe { vrev64q_f32(self.elements) },
        }
    }

    #[inline(always)]
    fn dup_real(self) -> Self {
        Self {
            elements: unsafe { vtrn1q_f32(self.elements, self.elements) },
        }
    }

    #[inline(always)]
    fn dup_imag(self) -> Self {
        Self {
            elements: unsafe { vtrn2q_f32(self.elements, self.elements) },
        }
    }

    #[inline(always)]
    fn conj(self) -> Self {
        Self {
            elements: unsafe { vmulq_f32(self.elements, vld1q_f32(CONJ_SIGNS.as_ptr())) },
        }
    }

    #[inline(always)]
    fn addsub(self, rhs: Self) -> Self {
        Self {
            elements: unsafe {
                let signed = vmulq_f32(rhs.elements, vld1q_f32(ADDSUB_SIGNS.as_ptr()));
                vaddq_f32(self.elements, signed)
            },
        }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        Self {
            elements: unsafe { vabsq_f32(self.elements) },
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self {
            elements: unsafe { vmaxq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Add for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Sub for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vsubq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Mul for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vmulq_f32(self.elements, rhs.elements) },
        }
    }
}

impl Div for F32x4 {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vdivq_f32(self.elements, rhs.elements) },
        }
    }
}

/// Two NEON registers carrying 4 complex values (8 lanes).
#[derive(Copy, Clone, Debug)]
pub struct F32x4x2 {
    pub lo: F32x4,
    pub hi: F32x4,
}

impl SimdLoad<f32> for F32x4x2 {
    type Output = Self;

    /// # Safety
    ///
    /// `ptr` must point to at least 8 valid f32 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f32) -> Self::Output {
        Self {
            lo: F32x4::load_unaligned(ptr),
            hi: F32x4::load_unaligned(ptr.add(LANE_COUNT)),
        }
    }
}

impl SimdStore<f32> for F32x4x2 {
    /// # Safety
    ///
    /// `ptr` must point to at least 8 writable f32 values.
    #[inline(always)]
    unsafe fn store_unaligned_at(&self, ptr: *mut f32) {
        self.lo.store_unaligned_at(ptr);
        self.hi.store_unaligned_at(ptr.add(LANE_COUNT));
    }
}

macro_rules! pairwise {
    ($($method:ident),*) => {
        $(
            #[inline(always)]
            fn $method(self) -> Self {
                Self { lo: self.lo.$method(), hi: self.hi.$method() }
            }
        )*
    };
}

macro_rules! pairwise_op {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl $trait for F32x4x2 {
                type Output = Self;

                #[inline(always)]
                fn $method(self, rhs: Self) -> Self::Output {
                    Self {
                        lo: self.lo.$method(rhs.lo),
                        hi: self.hi.$method(rhs.hi),
                    }
                }
            }
        )*
    };
}

pairwise_op!(Add::add, Sub::sub, Mul::mul, Div::div);

impl ComplexLanes for F32x4x2 {
    const COMPLEX_COUNT: usize = 2 * F32x4::COMPLEX_COUNT;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        let half = F32x4::splat(value);
        Self { lo: half, hi: half }
    }

    #[inline(always)]
    unsafe fn splat_real(value: f32) -> Self {
        let half = F32x4::splat_real(value);
        Self { lo: half, hi: half }
    }

    pairwise!(swap_pairs, dup_real, dup_imag, conj, abs);

    #[inline(always)]
    fn addsub(self, rhs: Self) -> Self {
        Self {
            lo: self.lo.addsub(rhs.lo),
            hi: self.hi.addsub(rhs.hi),
        }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        Self {
            lo: self.lo.max(rhs.lo),
            hi: self.hi.max(rhs.hi),
        }
    }
}
