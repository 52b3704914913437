//! Packed-lane container for `W` independent complex values.
//!
//! A `Packed<W>` holds `W` complex samples as `2 * W` real `f32` lanes laid
//! out as interleaved `(re, im)` pairs, instance 0 in the lowest lanes:
//!
//! ```text
//! W = 2: [ re0, im0, re1, im1 ]
//! W = 4: [ re0, im0, re1, im1, re2, im2, re3, im3 ]
//! ```
//!
//! Every packed kernel in this crate loads and stores this exact layout, so
//! instance `i` of an input group always lands in instance `i` of the output
//! group. A lane mix-up is invisible to the type system and only shows up as
//! wrong numbers, which is why the layout lives in exactly one place.

use crate::complex::Complex32;
use crate::error::{validation_error, Result};

/// `W` complex values packed as `2 * W` interleaved `f32` lanes.
///
/// The container is 32-byte aligned so that any width fits an AVX register
/// load without straddling.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(32))]
pub struct Packed<const W: usize> {
    values: [Complex32; W],
}

/// Two complex values in four lanes (one 128-bit register).
pub type Packed2 = Packed<2>;

/// Four complex values in eight lanes (one 256-bit register).
pub type Packed4 = Packed<4>;

impl<const W: usize> Default for Packed<W> {
    fn default() -> Self {
        Self::splat(Complex32::new(0.0, 0.0))
    }
}

impl<const W: usize> Packed<W> {
    /// Number of real lanes in the group.
    pub const LANES: usize = 2 * W;

    /// Packs `W` instances, preserving their order.
    #[inline(always)]
    pub fn from_instances(values: [Complex32; W]) -> Self {
        Self { values }
    }

    /// Broadcasts one value into every instance.
    #[inline(always)]
    pub fn splat(value: Complex32) -> Self {
        Self { values: [value; W] }
    }

    /// Unpacks the group into its `W` instances.
    #[inline(always)]
    pub fn instances(&self) -> [Complex32; W] {
        self.values
    }

    /// Returns instance `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= W`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Complex32 {
        self.values[index]
    }

    /// Builds a group from `2 * W` interleaved lanes.
    pub fn from_lanes(lanes: &[f32]) -> Result<Self> {
        if lanes.len() != Self::LANES {
            return Err(validation_error(format!(
                "packed group of width {W} needs {} lanes, got {}",
                Self::LANES,
                lanes.len()
            )));
        }

        Ok(Self {
            values: std::array::from_fn(|i| Complex32::new(lanes[2 * i], lanes[2 * i + 1])),
        })
    }

    /// Views the group as its `2 * W` interleaved lanes.
    #[inline(always)]
    pub fn as_lanes(&self) -> &[f32] {
        // SAFETY: `Complex32` is `#[repr(C)]` with two `f32` fields, so
        // `[Complex32; W]` is exactly `2 * W` contiguous, initialized `f32`s.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), Self::LANES) }
    }

    /// Pointer to lane 0, for vector loads.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const f32 {
        self.values.as_ptr() as *const f32
    }

    /// Mutable pointer to lane 0, for vector stores.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut f32 {
        self.values.as_mut_ptr() as *mut f32
    }
}

impl<const W: usize> From<[Complex32; W]> for Packed<W> {
    fn from(values: [Complex32; W]) -> Self {
        Self::from_instances(values)
    }
}
