//! Zero-Forcing and MMSE written once over [`ComplexLanes`].
//!
//! Each ISA module loads its packed operands into registers, calls these
//! functions from inside a `#[target_feature]` entry point, and stores the
//! result. The operation sequence per pair mirrors
//! [`crate::solver::generic`] step for step.

use crate::matrix::{Channel, Received, Symbols};
use crate::simd::traits::ComplexLanes;

#[inline(always)]
pub(crate) fn zf<V: ComplexLanes>(h: &Channel<V>, y: &Received<V>, norm: f32) -> Symbols<V> {
    let det = h.h00.cmul(h.h11) - h.h01.cmul(h.h10);
    let s = det.recip().scale(norm);

    Symbols {
        x0: (h.h11.cmul(y.y0) - h.h01.cmul(y.y1)).cmul(s),
        x1: (h.h00.cmul(y.y1) - h.h10.cmul(y.y0)).cmul(s),
    }
}

#[inline(always)]
pub(crate) fn mmse<V: ComplexLanes>(
    h: &Channel<V>,
    y: &Received<V>,
    noise_estimate: f32,
    norm: f32,
) -> Symbols<V> {
    // A = H^H H + n0 I
    let a00 = (h.h00.conj_mul(h.h00) + h.h10.conj_mul(h.h10)).add_real(noise_estimate);
    let a01 = h.h00.conj_mul(h.h01) + h.h10.conj_mul(h.h11);
    let a10 = h.h01.conj_mul(h.h00) + h.h11.conj_mul(h.h10);
    let a11 = (h.h01.conj_mul(h.h01) + h.h11.conj_mul(h.h11)).add_real(noise_estimate);

    // z = H^H y
    let z0 = h.h00.conj_mul(y.y0) + h.h10.conj_mul(y.y1);
    let z1 = h.h01.conj_mul(y.y0) + h.h11.conj_mul(y.y1);

    let det = a00.cmul(a11) - a01.cmul(a10);
    let s = det.recip().scale(norm);

    Symbols {
        x0: (a11.cmul(z0) - a01.cmul(z1)).cmul(s),
        x1: (a00.cmul(z1) - a10.cmul(z0)).cmul(s),
    }
}
