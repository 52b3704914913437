//! Backend discovery and kernel-table construction.

use mimo2x2::dispatch::BACKEND_ENV;
use mimo2x2::{kernels, Backend, Kernels, MimoError};

#[test_log::test]
fn test_available_backends_build_tables() {
    for backend in Backend::ALL {
        match Kernels::with_backend(backend) {
            Ok(kernels) => {
                assert!(backend.is_available());
                assert_eq!(kernels.backend(), backend);
                assert!(kernels.backend_x2().is_available());
                assert!(kernels.backend_x4().is_available());
            }
            Err(MimoError::UnsupportedBackend { backend: name }) => {
                assert!(!backend.is_available());
                assert_eq!(name, backend.name());
            }
            Err(other) => panic!("unexpected error {other}"),
        }
    }
}

#[test_log::test]
fn test_global_table_uses_available_backend() {
    let kernels = kernels();
    assert!(kernels.backend().is_available());
    assert!(kernels.backend_x2().is_available());
    assert!(kernels.backend_x4().is_available());
}

#[test_log::test]
fn test_detect_without_override_picks_best() {
    if std::env::var_os(BACKEND_ENV).is_some() {
        return;
    }
    assert_eq!(Kernels::detect().backend(), Backend::best_available());
}

#[cfg(target_arch = "x86_64")]
#[test_log::test]
fn test_avx_table_keeps_sse_for_width_two() {
    if !Backend::Avx.is_available() {
        return;
    }
    let kernels = Kernels::with_backend(Backend::Avx).unwrap();
    assert_eq!(kernels.backend_x2(), Backend::Sse);
    assert_eq!(kernels.backend_x4(), Backend::Avx);
}

#[cfg(target_arch = "aarch64")]
#[test_log::test]
fn test_neon_serves_both_widths() {
    if !Backend::Neon.is_available() {
        return;
    }
    let kernels = Kernels::with_backend(Backend::Neon).unwrap();
    assert_eq!(kernels.backend_x2(), Backend::Neon);
    assert_eq!(kernels.backend_x4(), Backend::Neon);
}
