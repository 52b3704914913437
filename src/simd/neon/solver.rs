//! Width-2 and width-4 Zero-Forcing and MMSE on NEON registers.

use crate::matrix::{Channel, Received, Symbols};
use crate::packed::{Packed, Packed2, Packed4};
use crate::simd::kernel;
use crate::simd::neon::f32x4::{F32x4, F32x4x2};
use crate::simd::traits::{SimdLoad, SimdStore};

#[inline(always)]
unsafe fn load<V: SimdLoad<f32, Output = V>, const W: usize>(p: &Packed<W>) -> V {
    V::load_unaligned(p.as_ptr())
}

#[inline(always)]
unsafe fn store<V: SimdStore<f32>, const W: usize>(x: &Symbols<V>) -> Symbols<Packed<W>> {
    let mut out = Symbols::<Packed<W>>::default();
    x.x0.store_unaligned_at(out.x0.as_mut_ptr());
    x.x1.store_unaligned_at(out.x1.as_mut_ptr());
    out
}

#[inline(always)]
unsafe fn load_operands<V: SimdLoad<f32, Output = V>, const W: usize>(
    h: &Channel<Packed<W>>,
    y: &Received<Packed<W>>,
) -> (Channel<V>, Received<V>) {
    (
        Channel::new(load(&h.h00), load(&h.h01), load(&h.h10), load(&h.h11)),
        Received::new(load(&y.y0), load(&y.y1)),
    )
}

/// Zero-Forcing over two packed resource elements.
///
/// # Safety
///
/// The running CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn zf_x2(h: &Channel<Packed2>, y: &Received<Packed2>, norm: f32) -> Symbols<Packed2> {
    let (h, y) = load_operands::<F32x4, 2>(h, y);
    store(&kernel::zf(&h, &y, norm))
}

/// MMSE over two packed resource elements.
///
/// # Safety
///
/// The running CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn mmse_x2(
    h: &Channel<Packed2>,
    y: &Received<Packed2>,
    noise_estimate: f32,
    norm: f32,
) -> Symbols<Packed2> {
    let (h, y) = load_operands::<F32x4, 2>(h, y);
    store(&kernel::mmse(&h, &y, noise_estimate, norm))
}

/// Zero-Forcing over four packed resource elements (two registers per operand).
///
/// # Safety
///
/// The running CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn zf_x4(h: &Channel<Packed4>, y: &Received<Packed4>, norm: f32) -> Symbols<Packed4> {
    let (h, y) = load_operands::<F32x4x2, 4>(h, y);
    store(&kernel::zf(&h, &y, norm))
}

/// MMSE over four packed resource elements (two registers per operand).
///
/// # Safety
///
/// The running CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn mmse_x4(
    h: &Channel<Packed4>,
    y: &Received<Packed4>,
    noise_estimate: f32,
    norm: f32,
) -> Symbols<Packed4> {
    let (h, y) = load_operands::<F32x4x2, 4>(h, y);
    store(&kernel::mmse(&h, &y, noise_estimate, norm))
}
