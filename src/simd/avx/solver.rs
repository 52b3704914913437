//! Width-4 Zero-Forcing and MMSE on AVX registers.

use crate::matrix::{Channel, Received, Symbols};
use crate::packed::Packed4;
use crate::simd::avx::f32x8::F32x8;
use crate::simd::kernel;
use crate::simd::traits::{SimdLoad, SimdStore};

#[inline(always)]
unsafe fn load(p: &Packed4) -> F32x8 {
    F32x8::load_unaligned(p.as_ptr())
}

#[inline(always)]
unsafe fn store(x: &Symbols<F32x8>) -> Symbols<Packed4> {
    let mut out = Symbols::<Packed4>::default();
    x.x0.store_unaligned_at(out.x0.as_mut_ptr());
    x.x1.store_unaligned_at(out.x1.as_mut_ptr());
    out
}

/// Zero-Forcing over four packed resource elements.
///
/// # Safety
///
/// The running CPU must support AVX.
#[target_feature(enable = "avx")]
pub unsafe fn zf_x4(h: &Channel<Packed4>, y: &Received<Packed4>, norm: f32) -> Symbols<Packed4> {
    let h = Channel::new(load(&h.h00), load(&h.h01), load(&h.h10), load(&h.h11));
    let y = Received::new(load(&y.y0), load(&y.y1));

    store(&kernel::zf(&h, &y, norm))
}

/// MMSE over four packed resource elements.
///
/// # Safety
///
/// The running CPU must support AVX.
#[target_feature(enable = "avx")]
pub unsafe fn mmse_x4(
    h: &Channel<Packed4>,
    y: &Received<Packed4>,
    noise_estimate: f32,
    norm: f32,
) -> Symbols<Packed4> {
    let h = Channel::new(load(&h.h00), load(&h.h01), load(&h.h10), load(&h.h11));
    let y = Received::new(load(&y.y0), load(&y.y1));

    store(&kernel::mmse(&h, &y, noise_estimate, norm))
}
