//! SSE implementations for 128-bit vector operations (width 2).
//!
//! One `__m128` register carries two complex values, so the kernels here
//! solve two independent 2x2 systems per call.
//!
//! # Architecture Requirements
//!
//! - **Target Architecture**: x86 or x86_64
//! - **Instruction Set**: SSE (baseline on every x86_64 CPU)
//! - **Runtime Detection**: [`crate::dispatch`] checks for SSE before
//!   installing these kernels
//!
//! # Available Types
//!
//! - [`f32x4::F32x4`]: 128-bit vector containing 4 packed f32 lanes

pub mod f32x4;

pub mod solver;

pub use solver::{mmse_x2, zf_x2};
