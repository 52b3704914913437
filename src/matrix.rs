//! Operands of the 2x2 system `y = H x`.
//!
//! [`Channel`], [`Received`] and [`Symbols`] are generic over the sample
//! representation: `Complex32` for a single resource element, `Packed<W>`
//! for `W` independent resource elements solved together, or a vector
//! register type inside the SIMD kernels.

use ndarray::{arr1, arr2, Array1, Array2, ArrayView1, ArrayView2};

use crate::complex::Complex32;
use crate::error::{validation_error, MimoError, Result};
use crate::packed::Packed;

/// 2x2 channel matrix coupling two transmit layers to two receive observations.
///
/// ```text
/// [ y0 ]   [ h00 h01 ] [ x0 ]
/// [ y1 ] = [ h10 h11 ] [ x1 ]
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Channel<T> {
    pub h00: T,
    pub h01: T,
    pub h10: T,
    pub h11: T,
}

/// Received vector `y`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Received<T> {
    pub y0: T,
    pub y1: T,
}

/// Recovered (or transmitted) symbol vector `x`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Symbols<T> {
    pub x0: T,
    pub x1: T,
}

impl<T> Channel<T> {
    pub fn new(h00: T, h01: T, h10: T, h11: T) -> Self {
        Self { h00, h01, h10, h11 }
    }

    /// Applies `f` to every coefficient.
    #[inline(always)]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Channel<U> {
        Channel {
            h00: f(self.h00),
            h01: f(self.h01),
            h10: f(self.h10),
            h11: f(self.h11),
        }
    }
}

impl<T> Received<T> {
    pub fn new(y0: T, y1: T) -> Self {
        Self { y0, y1 }
    }

    #[inline(always)]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Received<U> {
        Received {
            y0: f(self.y0),
            y1: f(self.y1),
        }
    }
}

impl<T> Symbols<T> {
    pub fn new(x0: T, x1: T) -> Self {
        Self { x0, x1 }
    }

    #[inline(always)]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Symbols<U> {
        Symbols {
            x0: f(self.x0),
            x1: f(self.x1),
        }
    }
}

impl Channel<Complex32> {
    /// Determinant `h00*h11 - h01*h10`.
    pub fn det(&self) -> Complex32 {
        self.h00 * self.h11 - self.h01 * self.h10
    }

    /// Forward model `y = H x`.
    pub fn apply(&self, x: &Symbols<Complex32>) -> Received<Complex32> {
        Received {
            y0: self.h00 * x.x0 + self.h01 * x.x1,
            y1: self.h10 * x.x0 + self.h11 * x.x1,
        }
    }

    pub fn to_array(&self) -> Array2<Complex32> {
        arr2(&[[self.h00, self.h01], [self.h10, self.h11]])
    }
}

impl Received<Complex32> {
    pub fn to_array(&self) -> Array1<Complex32> {
        arr1(&[self.y0, self.y1])
    }
}

impl Symbols<Complex32> {
    pub fn to_array(&self) -> Array1<Complex32> {
        arr1(&[self.x0, self.x1])
    }

    /// `true` when both symbols have finite components.
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.x1.is_finite()
    }
}

impl<'a> TryFrom<ArrayView2<'a, Complex32>> for Channel<Complex32> {
    type Error = MimoError;

    fn try_from(view: ArrayView2<'a, Complex32>) -> Result<Self> {
        if view.dim() != (2, 2) {
            return Err(validation_error(format!(
                "channel matrix must be 2x2, got {}x{}",
                view.nrows(),
                view.ncols()
            )));
        }

        Ok(Self::new(
            view[[0, 0]],
            view[[0, 1]],
            view[[1, 0]],
            view[[1, 1]],
        ))
    }
}

impl<'a> TryFrom<ArrayView1<'a, Complex32>> for Received<Complex32> {
    type Error = MimoError;

    fn try_from(view: ArrayView1<'a, Complex32>) -> Result<Self> {
        if view.len() != 2 {
            return Err(validation_error(format!(
                "received vector must have 2 samples, got {}",
                view.len()
            )));
        }

        Ok(Self::new(view[0], view[1]))
    }
}

// Packing: instance `i` of every packed operand belongs to the same
// resource element, and lands in instance `i` of the packed output.

impl<const W: usize> Channel<Packed<W>> {
    /// Packs `W` channel matrices into one group, preserving order.
    pub fn pack(instances: &[Channel<Complex32>; W]) -> Self {
        Self {
            h00: Packed::from_instances(std::array::from_fn(|i| instances[i].h00)),
            h01: Packed::from_instances(std::array::from_fn(|i| instances[i].h01)),
            h10: Packed::from_instances(std::array::from_fn(|i| instances[i].h10)),
            h11: Packed::from_instances(std::array::from_fn(|i| instances[i].h11)),
        }
    }

    /// Extracts instance `index`.
    pub fn instance(&self, index: usize) -> Channel<Complex32> {
        Channel::new(
            self.h00.get(index),
            self.h01.get(index),
            self.h10.get(index),
            self.h11.get(index),
        )
    }
}

impl<const W: usize> Received<Packed<W>> {
    /// Packs `W` received vectors into one group, preserving order.
    pub fn pack(instances: &[Received<Complex32>; W]) -> Self {
        Self {
            y0: Packed::from_instances(std::array::from_fn(|i| instances[i].y0)),
            y1: Packed::from_instances(std::array::from_fn(|i| instances[i].y1)),
        }
    }

    pub fn instance(&self, index: usize) -> Received<Complex32> {
        Received::new(self.y0.get(index), self.y1.get(index))
    }
}

impl<const W: usize> Symbols<Packed<W>> {
    pub fn pack(instances: &[Symbols<Complex32>; W]) -> Self {
        Self {
            x0: Packed::from_instances(std::array::from_fn(|i| instances[i].x0)),
            x1: Packed::from_instances(std::array::from_fn(|i| instances[i].x1)),
        }
    }

    pub fn instance(&self, index: usize) -> Symbols<Complex32> {
        Symbols::new(self.x0.get(index), self.x1.get(index))
    }

    /// Unpacks the group into its `W` symbol vectors, in lane order.
    pub fn unpack(&self) -> [Symbols<Complex32>; W] {
        std::array::from_fn(|i| self.instance(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f32, im: f32) -> Complex32 {
        Complex32::new(re, im)
    }

    fn channel(seed: f32) -> Channel<Complex32> {
        Channel::new(
            c(seed, 0.1),
            c(0.2, seed),
            c(-seed, 0.3),
            c(0.4, -seed),
        )
    }

    #[test]
    fn test_det() {
        let h = Channel::new(c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0));
        assert_eq!(h.det(), c(-2.0, 0.0));
    }

    #[test]
    fn test_apply_matches_ndarray_dot() {
        let h = channel(0.7);
        let x = Symbols::new(c(1.0, -1.0), c(0.5, 2.0));

        let y = h.apply(&x);
        let expected = h.to_array().dot(&x.to_array());

        assert!((y.y0 - expected[0]).norm() < 1e-6);
        assert!((y.y1 - expected[1]).norm() < 1e-6);
    }

    #[test]
    fn test_channel_try_from_array() {
        let h = channel(1.5);
        let back = Channel::try_from(h.to_array().view()).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn test_channel_try_from_wrong_shape() {
        let a = Array2::<Complex32>::zeros((3, 2));
        let err = Channel::try_from(a.view()).unwrap_err();
        assert!(format!("{err}").contains("must be 2x2, got 3x2"));
    }

    #[test]
    fn test_received_try_from_wrong_length() {
        let a = Array1::<Complex32>::zeros(3);
        assert!(Received::try_from(a.view()).is_err());
    }

    #[test]
    fn test_pack_preserves_instance_order() {
        let instances = [channel(1.0), channel(2.0), channel(3.0), channel(4.0)];
        let packed = Channel::<Packed<4>>::pack(&instances);

        for (i, h) in instances.iter().enumerate() {
            assert_eq!(packed.instance(i), *h, "instance {i} moved");
        }
        // h01 of instance 2 sits in lanes 4 and 5.
        assert_eq!(&packed.h01.as_lanes()[4..6], &[0.2, 3.0]);
    }

    #[test]
    fn test_symbols_unpack() {
        let xs = [
            Symbols::new(c(1.0, 0.0), c(0.0, 1.0)),
            Symbols::new(c(2.0, 0.0), c(0.0, 2.0)),
        ];
        let packed = Symbols::<Packed<2>>::pack(&xs);
        assert_eq!(packed.unpack(), xs);
    }
}
