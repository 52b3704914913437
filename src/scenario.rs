//! Synthetic 2x2 test problems with known transmitted symbols.
//!
//! [`Scenario::random`] draws a well-conditioned channel with `det(H) = 1`
//! by choosing `h00`, `h01`, `h10` freely and solving `h00 h11 - h01 h10 = 1`
//! for `h11 = (1 + h01 h10) / h00`. The received vector `y = H x` is computed
//! in double precision, so the only error a solver sees is its own rounding.

use num::complex::Complex64;
use rand::Rng;

use crate::complex::{self, Complex32};
use crate::matrix::{Channel, Received, Symbols};

/// Smallest `|h00|^2` accepted when building a unit-determinant channel.
pub const MIN_PIVOT_POWER: f32 = 0.125;

/// A channel, the symbols sent through it, and what arrived.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scenario {
    pub channel: Channel<Complex32>,
    pub symbols: Symbols<Complex32>,
    pub received: Received<Complex32>,
}

/// Complex value with both parts uniform in `[-0.5, 0.5)`.
pub fn random_complex<R: Rng + ?Sized>(rng: &mut R) -> Complex32 {
    Complex32::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5))
}

fn widen(value: Complex32) -> Complex64 {
    Complex64::new(value.re as f64, value.im as f64)
}

fn narrow(value: Complex64) -> Complex32 {
    Complex32::new(value.re as f32, value.im as f32)
}

impl Scenario {
    /// Transmits `symbols` through `channel`, noiselessly.
    pub fn new(channel: Channel<Complex32>, symbols: Symbols<Complex32>) -> Self {
        let h = channel.map(widen);
        let x = symbols.map(widen);
        let received = Received::new(
            narrow(h.h00 * x.x0 + h.h01 * x.x1),
            narrow(h.h10 * x.x0 + h.h11 * x.x1),
        );

        Self {
            channel,
            symbols,
            received,
        }
    }

    /// Random symbols through a random channel with unit determinant.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let h00 = loop {
            let candidate = random_complex(rng);
            if candidate.norm_sqr() >= MIN_PIVOT_POWER {
                break candidate;
            }
        };
        let h01 = random_complex(rng);
        let h10 = random_complex(rng);
        let h11 = (Complex64::new(1.0, 0.0) + widen(h01) * widen(h10)) / widen(h00);

        let channel = Channel::new(h00, h01, h10, narrow(h11));
        let symbols = Symbols::new(random_complex(rng), random_complex(rng));
        Self::new(channel, symbols)
    }

    /// Random symbols through a rank-one channel.
    ///
    /// The second row is the first scaled by a power of two, so `det(H)`
    /// evaluates to exactly zero in `f32`.
    pub fn singular<R: Rng + ?Sized>(rng: &mut R) -> Self {
        const FACTORS: [f32; 4] = [0.5, 2.0, -1.0, 4.0];

        let h00 = random_complex(rng);
        let h01 = random_complex(rng);
        let k = FACTORS[rng.random_range(0..FACTORS.len())];

        let channel = Channel::new(h00, h01, h00 * k, h01 * k);
        let symbols = Symbols::new(random_complex(rng), random_complex(rng));
        Self::new(channel, symbols)
    }

    /// Squared error of `estimate` against the transmitted symbols.
    pub fn error_energy(&self, estimate: &Symbols<Complex32>) -> f32 {
        error_energy(&self.symbols, estimate)
    }
}

/// `|a.x0 - b.x0|^2 + |a.x1 - b.x1|^2`.
pub fn error_energy(a: &Symbols<Complex32>, b: &Symbols<Complex32>) -> f32 {
    complex::error_energy(&[a.x0, a.x1], &[b.x0, b.x1])
}
