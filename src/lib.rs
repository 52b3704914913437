//! # mimo2x2
//!
//! Closed-form 2x2 complex MIMO equalization (Zero-Forcing and MMSE) with
//! scalar, 2-wide and 4-wide packed kernels.
//!
//! Every kernel solves `y = H x` for one or more independent resource
//! elements. The packed widths process 2 or 4 instances at once in the
//! interleaved `(re, im)` lane layout of [`Packed`], and agree with the
//! scalar solver instance for instance.
//!
//! ```
//! use mimo2x2::{kernels, Channel, Complex32, Received};
//!
//! let one = Complex32::new(1.0, 0.0);
//! let zero = Complex32::new(0.0, 0.0);
//! let h = Channel::new(one, zero, zero, one);
//! let y = Received::new(Complex32::new(0.5, -0.5), Complex32::new(2.0, 1.0));
//!
//! let x = kernels().zf_x1(&h, &y, 1.0);
//! assert_eq!(x.x0, y.y0);
//! assert_eq!(x.x1, y.y1);
//! ```

pub mod batch;
pub mod complex;
pub mod dispatch;
pub mod error;
pub mod matrix;
pub mod packed;
pub mod scenario;
pub mod simd;
pub mod solver;

pub use batch::{Equalize, ResourceElements};
pub use complex::Complex32;
pub use dispatch::{kernels, Backend, Kernels};
pub use error::{MimoError, Result};
pub use matrix::{Channel, Received, Symbols};
pub use packed::{Packed, Packed2, Packed4};
pub use solver::Policy;

/// Resource-element count above which batches are split across threads.
pub const PARALLEL_SIMD_THRESHOLD: usize = 16 * 1024;

/// Resource elements per rayon task. A multiple of 4 so every chunk but the
/// last stays on the 4-wide kernel.
pub const PARALLEL_CHUNK_SIZE: usize = 4 * 1024;
