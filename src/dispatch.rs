//! Runtime selection between the generic and vectorized kernels.
//!
//! CPU capabilities are queried once and turned into a [`Kernels`] table of
//! plain function pointers, so callers in a hot loop never branch on
//! feature flags. Every entry in the table has the same contract as the
//! generic solver it replaces; the only difference between backends is how
//! fast they run.
//!
//! | Backend   | width 2        | width 4              |
//! |-----------|----------------|----------------------|
//! | `Generic` | lane-wise      | lane-wise            |
//! | `Sse`     | SSE            | lane-wise            |
//! | `Avx`     | SSE            | AVX                  |
//! | `Neon`    | NEON           | NEON (two registers) |
//!
//! The backend can be forced with the `MIMO2X2_BACKEND` environment variable
//! (`generic`, `sse`, `avx`, `neon`). An unknown or unsupported value is
//! logged and ignored.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use log::{debug, warn};

use crate::complex::Complex32;
use crate::error::{unknown_backend, unsupported_backend, MimoError, Result};
use crate::matrix::{Channel, Received, Symbols};
use crate::packed::{Packed, Packed2, Packed4};
use crate::solver::{generic, Policy};

/// Environment variable that forces a backend.
pub const BACKEND_ENV: &str = "MIMO2X2_BACKEND";

/// Zero-Forcing over a packed group of width `W`.
pub type ZfFn<const W: usize> =
    fn(&Channel<Packed<W>>, &Received<Packed<W>>, f32) -> Symbols<Packed<W>>;

/// MMSE over a packed group of width `W`.
pub type MmseFn<const W: usize> =
    fn(&Channel<Packed<W>>, &Received<Packed<W>>, f32, f32) -> Symbols<Packed<W>>;

/// Instruction set a kernel runs on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    Generic,
    Sse,
    Avx,
    Neon,
}

impl Backend {
    pub const ALL: [Backend; 4] = [Backend::Generic, Backend::Sse, Backend::Avx, Backend::Neon];

    pub fn name(self) -> &'static str {
        match self {
            Backend::Generic => "generic",
            Backend::Sse => "sse",
            Backend::Avx => "avx",
            Backend::Neon => "neon",
        }
    }

    // Lowest number == highest priority
    fn priority(self) -> usize {
        match self {
            Backend::Avx => 0,
            Backend::Neon => 1,
            Backend::Sse => 2,
            Backend::Generic => usize::MAX,
        }
    }

    /// Whether the running CPU supports this backend.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Generic => true,
            Backend::Sse => {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                {
                    is_x86_feature_detected!("sse")
                }
                #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
                {
                    false
                }
            }
            Backend::Avx => {
                #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
                {
                    is_x86_feature_detected!("avx") && is_x86_feature_detected!("sse")
                }
                #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
                {
                    false
                }
            }
            Backend::Neon => {
                #[cfg(target_arch = "aarch64")]
                {
                    std::arch::is_aarch64_feature_detected!("neon")
                }
                #[cfg(not(target_arch = "aarch64"))]
                {
                    false
                }
            }
        }
    }

    /// The highest-priority backend the running CPU supports.
    pub fn best_available() -> Backend {
        Backend::ALL
            .into_iter()
            .filter(|backend| backend.is_available())
            .min_by_key(|backend| backend.priority())
            .unwrap_or(Backend::Generic)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = MimoError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Backend::ALL
            .into_iter()
            .find(|backend| backend.name() == name)
            .ok_or_else(|| unknown_backend(s))
    }
}

// Safe shims over the `unsafe` target-feature entry points. They are only
// ever stored in a `Kernels` table after `Backend::is_available` returned
// true for the matching backend.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86 {
    use super::*;
    use crate::simd::{avx, sse};

    pub(super) fn zf_x2(h: &Channel<Packed2>, y: &Received<Packed2>, norm: f32) -> Symbols<Packed2> {
        // SAFETY: installed only when SSE is available.
        unsafe { sse::zf_x2(h, y, norm) }
    }

    pub(super) fn mmse_x2(
        h: &Channel<Packed2>,
        y: &Received<Packed2>,
        noise_estimate: f32,
        norm: f32,
    ) -> Symbols<Packed2> {
        // SAFETY: installed only when SSE is available.
        unsafe { sse::mmse_x2(h, y, noise_estimate, norm) }
    }

    pub(super) fn zf_x4(h: &Channel<Packed4>, y: &Received<Packed4>, norm: f32) -> Symbols<Packed4> {
        // SAFETY: installed only when AVX is available.
        unsafe { avx::zf_x4(h, y, norm) }
    }

    pub(super) fn mmse_x4(
        h: &Channel<Packed4>,
        y: &Received<Packed4>,
        noise_estimate: f32,
        norm: f32,
    ) -> Symbols<Packed4> {
        // SAFETY: installed only when AVX is available.
        unsafe { avx::mmse_x4(h, y, noise_estimate, norm) }
    }
}

#[cfg(target_arch = "aarch64")]
mod arm {
    use super::*;
    use crate::simd::neon;

    // SAFETY (all four): installed only when NEON is available.

    pub(super) fn zf_x2(h: &Channel<Packed2>, y: &Received<Packed2>, norm: f32) -> Symbols<Packed2> {
        unsafe { neon::zf_x2(h, y, norm) }
    }

    pub(super) fn mmse_x2(
        h: &Channel<Packed2>,
        y: &Received<Packed2>,
        noise_estimate: f32,
        norm: f32,
    ) -> Symbols<Packed2> {
        unsafe { neon::mmse_x2(h, y, noise_estimate, norm) }
    }

    pub(super) fn zf_x4(h: &Channel<Packed4>, y: &Received<Packed4>, norm: f32) -> Symbols<Packed4> {
        unsafe { neon::zf_x4(h, y, norm) }
    }

    pub(super) fn mmse_x4(
        h: &Channel<Packed4>,
        y: &Received<Packed4>,
        noise_estimate: f32,
        norm: f32,
    ) -> Symbols<Packed4> {
        unsafe { neon::mmse_x4(h, y, noise_estimate, norm) }
    }
}

/// Resolved kernel table, one entry per policy and width.
#[derive(Copy, Clone)]
pub struct Kernels {
    backend: Backend,
    backend_x2: Backend,
    backend_x4: Backend,
    zf_x2: ZfFn<2>,
    mmse_x2: MmseFn<2>,
    zf_x4: ZfFn<4>,
    mmse_x4: MmseFn<4>,
}

impl fmt::Debug for Kernels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernels")
            .field("backend", &self.backend)
            .field("backend_x2", &self.backend_x2)
            .field("backend_x4", &self.backend_x4)
            .finish()
    }
}

impl Default for Kernels {
    fn default() -> Self {
        Self::generic()
    }
}

impl Kernels {
    /// Lane-wise generic kernels for every width. Always available.
    pub fn generic() -> Self {
        Self {
            backend: Backend::Generic,
            backend_x2: Backend::Generic,
            backend_x4: Backend::Generic,
            zf_x2: generic::zf_packed::<2>,
            mmse_x2: generic::mmse_packed::<2>,
            zf_x4: generic::zf_packed::<4>,
            mmse_x4: generic::mmse_packed::<4>,
        }
    }

    /// Kernels for a specific backend.
    ///
    /// Fails with [`MimoError::UnsupportedBackend`] when the running CPU
    /// lacks the instruction set.
    pub fn with_backend(backend: Backend) -> Result<Self> {
        if !backend.is_available() {
            return Err(unsupported_backend(backend.name()));
        }

        Ok(Self::install(backend))
    }

    /// Best kernels for the running CPU, honoring [`BACKEND_ENV`].
    pub fn detect() -> Self {
        if let Ok(value) = std::env::var(BACKEND_ENV) {
            match value.parse::<Backend>().and_then(Self::with_backend) {
                Ok(kernels) => {
                    debug!("{BACKEND_ENV}={value}: using {kernels:?}");
                    return kernels;
                }
                Err(err) => warn!("ignoring {BACKEND_ENV}={value}: {err}"),
            }
        }

        let kernels = Self::install(Backend::best_available());
        debug!(
            "2x2 kernels: width 2 on {}, width 4 on {}",
            kernels.backend_x2, kernels.backend_x4
        );
        kernels
    }

    // Caller guarantees `backend.is_available()`.
    fn install(backend: Backend) -> Self {
        match backend {
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Sse => Self {
                backend,
                backend_x2: Backend::Sse,
                zf_x2: x86::zf_x2,
                mmse_x2: x86::mmse_x2,
                ..Self::generic()
            },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Backend::Avx => Self {
                backend,
                backend_x2: Backend::Sse,
                backend_x4: Backend::Avx,
                zf_x2: x86::zf_x2,
                mmse_x2: x86::mmse_x2,
                zf_x4: x86::zf_x4,
                mmse_x4: x86::mmse_x4,
            },
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => Self {
                backend,
                backend_x2: Backend::Neon,
                backend_x4: Backend::Neon,
                zf_x2: arm::zf_x2,
                mmse_x2: arm::mmse_x2,
                zf_x4: arm::zf_x4,
                mmse_x4: arm::mmse_x4,
            },
            _ => Self::generic(),
        }
    }

    /// Backend the table was built for.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Backend serving width-2 groups.
    pub fn backend_x2(&self) -> Backend {
        self.backend_x2
    }

    /// Backend serving width-4 groups.
    pub fn backend_x4(&self) -> Backend {
        self.backend_x4
    }

    #[inline(always)]
    pub fn zf_x1(
        &self,
        h: &Channel<Complex32>,
        y: &Received<Complex32>,
        norm: f32,
    ) -> Symbols<Complex32> {
        generic::zf(h, y, norm)
    }

    #[inline(always)]
    pub fn mmse_x1(
        &self,
        h: &Channel<Complex32>,
        y: &Received<Complex32>,
        noise_estimate: f32,
        norm: f32,
    ) -> Symbols<Complex32> {
        generic::mmse(h, y, noise_estimate, norm)
    }

    #[inline(always)]
    pub fn zf_x2(&self, h: &Channel<Packed2>, y: &Received<Packed2>, norm: f32) -> Symbols<Packed2> {
        (self.zf_x2)(h, y, norm)
    }

    #[inline(always)]
    pub fn mmse_x2(
        &self,
        h: &Channel<Packed2>,
        y: &Received<Packed2>,
        noise_estimate: f32,
        norm: f32,
    ) -> Symbols<Packed2> {
        (self.mmse_x2)(h, y, noise_estimate, norm)
    }

    #[inline(always)]
    pub fn zf_x4(&self, h: &Channel<Packed4>, y: &Received<Packed4>, norm: f32) -> Symbols<Packed4> {
        (self.zf_x4)(h, y, norm)
    }

    #[inline(always)]
    pub fn mmse_x4(
        &self,
        h: &Channel<Packed4>,
        y: &Received<Packed4>,
        noise_estimate: f32,
        norm: f32,
    ) -> Symbols<Packed4> {
        (self.mmse_x4)(h, y, noise_estimate, norm)
    }

    #[inline(always)]
    pub fn solve_x1(
        &self,
        policy: Policy,
        h: &Channel<Complex32>,
        y: &Received<Complex32>,
        norm: f32,
    ) -> Symbols<Complex32> {
        generic::solve(policy, h, y, norm)
    }

    #[inline(always)]
    pub fn solve_x2(
        &self,
        policy: Policy,
        h: &Channel<Packed2>,
        y: &Received<Packed2>,
        norm: f32,
    ) -> Symbols<Packed2> {
        match policy {
            Policy::ZeroForcing => self.zf_x2(h, y, norm),
            Policy::Mmse { noise_estimate } => self.mmse_x2(h, y, noise_estimate, norm),
        }
    }

    #[inline(always)]
    pub fn solve_x4(
        &self,
        policy: Policy,
        h: &Channel<Packed4>,
        y: &Received<Packed4>,
        norm: f32,
    ) -> Symbols<Packed4> {
        match policy {
            Policy::ZeroForcing => self.zf_x4(h, y, norm),
            Policy::Mmse { noise_estimate } => self.mmse_x4(h, y, noise_estimate, norm),
        }
    }
}

static KERNELS: OnceLock<Kernels> = OnceLock::new();

/// Process-wide kernel table, detected on first use.
pub fn kernels() -> &'static Kernels {
    KERNELS.get_or_init(Kernels::detect)
}
