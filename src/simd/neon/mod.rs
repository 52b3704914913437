//! ARM NEON implementations for 128-bit vector operations (widths 2 and 4).
//!
//! One `float32x4_t` register carries two complex values. Width 2 uses one
//! register per operand; width 4 uses a register pair.
//!
//! # Architecture Requirements
//!
//! - **Target Architecture**: AArch64
//! - **Instruction Set**: Advanced SIMD (NEON), baseline on every AArch64 CPU
//! - **Runtime Detection**: [`crate::dispatch`] checks for NEON before
//!   installing these kernels
//!
//! # Platform Support
//!
//! - **Apple Silicon**: M1, M2, M3 processors (macOS, iOS)
//! - **AWS Graviton**: Graviton2, Graviton3 processors
//! - **Embedded**: ARM Cortex-A series processors

pub mod f32x4;

pub mod solver;

pub use solver::{mmse_x2, mmse_x4, zf_x2, zf_x4};
