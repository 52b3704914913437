//! Width-2 Zero-Forcing and MMSE on SSE registers.

use crate::matrix::{Channel, Received, Symbols};
use crate::packed::Packed2;
use crate::simd::kernel;
use crate::simd::sse::f32x4::F32x4;
use crate::simd::traits::{SimdLoad, SimdStore};

#[inline(always)]
unsafe fn load(p: &Packed2) -> F32x4 {
    F32x4::load_unaligned(p.as_ptr())
}

#[inline(always)]
unsafe fn store(x: &Symbols<F32x4>) -> Symbols<Packed2> {
    let mut out = Symbols::<Packed2>::default();
    x.x0.store_unaligned_at(out.x0.as_mut_ptr());
    x.x1.store_unaligned_at(out.x1.as_mut_ptr());
    out
}

/// Zero-Forcing over two packed resource elements.
///
/// # Safety
///
/// The running CPU must support SSE.
#[target_feature(enable = "sse")]
pub unsafe fn zf_x2(h: &Channel<Packed2>, y: &Received<Packed2>, norm: f32) -> Symbols<Packed2> {
    let h = Channel::new(load(&h.h00), load(&h.h01), load(&h.h10), load(&h.h11));
    let y = Received::new(load(&y.y0), load(&y.y1));

    store(&kernel::zf(&h, &y, norm))
}

/// MMSE over two packed resource elements.
///
/// # Safety
///
/// The running CPU must support SSE.
#[target_feature(enable = "sse")]
pub unsafe fn mmse_x2(
    h: &Channel<Packed2>,
    y: &Received<Packed2>,
    noise_estimate: f32,
    norm: f32,
) -> Symbols<Packed2> {
    let h = Channel::new(load(&h.h00), load(&h.h01), load(&h.h10), load(&h.h11));
    let y = Received::new(load(&y.y0), load(&y.y1));

    store(&kernel::mmse(&h, &y, noise_estimate, norm))
}
