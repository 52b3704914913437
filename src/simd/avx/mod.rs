//! AVX implementations for 256-bit vector operations (width 4).
//!
//! One `__m256` register carries four complex values, so the kernels here
//! solve four independent 2x2 systems per call.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Sandy Bridge (2011+) or AMD Bulldozer (2011+)
//! - **Target Architecture**: x86 or x86_64
//! - **Runtime Detection**: [`crate::dispatch`] checks for AVX before
//!   installing these kernels
//!
//! # Available Types
//!
//! - [`f32x8::F32x8`]: 256-bit vector containing 8 packed f32 lanes

pub mod f32x8;

pub mod solver;

pub use solver::{mmse_x4, zf_x4};
