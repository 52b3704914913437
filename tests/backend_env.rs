//! The backend override environment variable.
//!
//! Kept in its own test binary with a single test, since it mutates the
//! process environment.

use mimo2x2::dispatch::BACKEND_ENV;
use mimo2x2::{Backend, Kernels};

#[test_log::test]
fn test_backend_override() {
    std::env::set_var(BACKEND_ENV, "generic");
    assert_eq!(Kernels::detect().backend(), Backend::Generic);

    // Unknown names are ignored.
    std::env::set_var(BACKEND_ENV, "vector-unit-9000");
    assert_eq!(Kernels::detect().backend(), Backend::best_available());

    // So are backends the CPU lacks.
    let missing = Backend::ALL.into_iter().find(|b| !b.is_available());
    if let Some(missing) = missing {
        std::env::set_var(BACKEND_ENV, missing.name());
        assert_eq!(Kernels::detect().backend(), Backend::best_available());
    }

    std::env::set_var(BACKEND_ENV, Backend::best_available().name().to_uppercase());
    assert_eq!(Kernels::detect().backend(), Backend::best_available());

    std::env::remove_var(BACKEND_ENV);
}
