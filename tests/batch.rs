//! Batch strategies agree with each other and with the ground truth.

use mimo2x2::scenario::{error_energy, Scenario};
use mimo2x2::{
    Backend, Channel, Complex32, Equalize, Kernels, Policy, Received, ResourceElements, Symbols,
    PARALLEL_SIMD_THRESHOLD,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_batch(len: usize, seed: u64) -> Vec<Scenario> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| Scenario::random(&mut rng)).collect()
}

fn split(batch: &[Scenario]) -> (Vec<Channel<Complex32>>, Vec<Received<Complex32>>) {
    batch.iter().map(|s| (s.channel, s.received)).unzip()
}

#[test]
fn test_strategies_agree_on_large_batch() {
    // Odd length past the threshold exercises the parallel path and every tail.
    let batch = random_batch(PARALLEL_SIMD_THRESHOLD + 7, 12345);
    let (channels, received) = split(&batch);
    let res = ResourceElements::new(&channels, &received).unwrap();

    for policy in [Policy::ZeroForcing, Policy::mmse(0.02)] {
        let scalar = res.scalar_equalize(policy, 1.0);
        let simd = res.simd_equalize(policy, 1.0);
        let parallel = res.par_simd_equalize(policy, 1.0);

        assert_eq!(scalar.len(), batch.len());
        for i in 0..batch.len() {
            assert!(error_energy(&scalar[i], &simd[i]) < 1e-6, "simd index {i}");
            assert_eq!(simd[i], parallel[i], "parallel index {i}");
        }
    }
}

#[test]
fn test_batch_recovers_symbols() {
    let batch = random_batch(1027, 99);
    let (channels, received) = split(&batch);
    let res = ResourceElements::new(&channels, &received).unwrap();

    let symbols = res.par_simd_equalize(Policy::ZeroForcing, 1.0);
    for (s, x) in batch.iter().zip(&symbols) {
        assert!(s.error_energy(x) < 1e-6);
    }
}

#[test]
fn test_equalize_into_every_backend() {
    let batch = random_batch(23, 7);
    let (channels, received) = split(&batch);
    let res = ResourceElements::new(&channels, &received).unwrap();
    let expected = res.scalar_equalize(Policy::mmse(0.1), 0.5);

    for backend in Backend::ALL.into_iter().filter(|b| b.is_available()) {
        let kernels = Kernels::with_backend(backend).unwrap();
        let mut out = vec![Symbols::default(); res.len()];
        res.equalize_into(&kernels, Policy::mmse(0.1), 0.5, &mut out)
            .unwrap();

        for (a, b) in out.iter().zip(&expected) {
            assert!(error_energy(a, b) < 1e-6, "{backend}");
        }
    }
}

#[test]
fn test_mismatched_lengths_rejected() {
    let batch = random_batch(4, 1);
    let (channels, received) = split(&batch);
    assert!(ResourceElements::new(&channels, &received[..3]).is_err());

    let res = ResourceElements::new(&channels, &received).unwrap();
    let mut out = vec![Symbols::default(); 5];
    assert!(res
        .equalize_into(&Kernels::generic(), Policy::ZeroForcing, 1.0, &mut out)
        .is_err());
}
