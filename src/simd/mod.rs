//! Vectorized kernels and the packed-lane register types behind them.
//!
//! Each ISA module wraps a vector register in a small type implementing
//! [`traits::ComplexLanes`], and exposes `unsafe` `#[target_feature]` entry
//! points with the same contract as [`crate::solver::generic`]. Modules are
//! compiled per target architecture only; whether the running CPU actually
//! supports them is decided at runtime by [`crate::dispatch`].

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod sse;

#[cfg(target_arch = "aarch64")]
pub mod neon;

pub(crate) mod kernel;

pub mod traits;

pub use traits::{ComplexLanes, SimdLoad, SimdStore};
