//! Zero-Forcing recovery on random unit-determinant channels.

use mimo2x2::scenario::{error_energy, Scenario};
use mimo2x2::{kernels, Channel, Complex32, Kernels, Packed2, Packed4, Received, Symbols};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;

const CASES: usize = 1000;

/// Error-energy bound for a noiseless round trip.
const TOLERANCE: f32 = 1e-6;

#[test]
fn test_zf_recovers_transmitted_symbols() {
    let mut rng = StdRng::seed_from_u64(12345);

    for case in 0..CASES {
        let s = Scenario::random(&mut rng);
        let x = kernels().zf_x1(&s.channel, &s.received, 1.0);
        let err = s.error_energy(&x);
        assert!(
            err < TOLERANCE,
            "case {case}: error energy {err:.3e} for {:?}",
            s.channel
        );
    }
}

#[test]
fn test_zf_packed_widths_recover_symbols() {
    let mut rng = StdRng::seed_from_u64(54321);

    for _ in 0..CASES / 4 {
        let group: [Scenario; 4] = std::array::from_fn(|_| Scenario::random(&mut rng));

        let h4 = Channel::<Packed4>::pack(&group.map(|s| s.channel));
        let y4 = Received::<Packed4>::pack(&group.map(|s| s.received));
        let x4 = kernels().zf_x4(&h4, &y4, 1.0).unpack();

        let h2 = Channel::<Packed2>::pack(&[group[0].channel, group[1].channel]);
        let y2 = Received::<Packed2>::pack(&[group[0].received, group[1].received]);
        let x2 = kernels().zf_x2(&h2, &y2, 1.0).unpack();

        for (s, x) in group.iter().zip(&x4) {
            assert!(s.error_energy(x) < TOLERANCE);
        }
        for (s, x) in group.iter().zip(&x2) {
            assert!(s.error_energy(x) < TOLERANCE);
        }
    }
}

#[test]
fn test_zf_norm_scales_output() {
    let mut rng = StdRng::seed_from_u64(99);
    let s = Scenario::random(&mut rng);

    let x = kernels().zf_x1(&s.channel, &s.received, 0.5);
    let expected = s.symbols.map(|v| v * 0.5);
    assert!(error_energy(&x, &expected) < TOLERANCE);
}

#[test]
fn test_zf_residual_against_ndarray() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..100 {
        let s = Scenario::random(&mut rng);
        let x = kernels().zf_x1(&s.channel, &s.received, 1.0);

        let residual: Array1<Complex32> = s.channel.to_array().dot(&x.to_array()) - s.received.to_array();
        let energy: f32 = residual.iter().map(|r| r.norm_sqr()).sum();
        assert!(energy < TOLERANCE, "residual energy {energy:.3e}");
    }
}

#[test]
fn test_zf_singular_channel_is_non_finite_on_every_width() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let group: [Scenario; 4] = std::array::from_fn(|_| Scenario::singular(&mut rng));

        for kernels in [Kernels::generic(), *kernels()] {
            let x1 = kernels.zf_x1(&group[0].channel, &group[0].received, 1.0);
            assert!(!x1.is_finite());

            let h2 = Channel::<Packed2>::pack(&[group[0].channel, group[1].channel]);
            let y2 = Received::<Packed2>::pack(&[group[0].received, group[1].received]);
            assert!(kernels.zf_x2(&h2, &y2, 1.0).unpack().iter().all(|x| !x.is_finite()));

            let h4 = Channel::<Packed4>::pack(&group.map(|s| s.channel));
            let y4 = Received::<Packed4>::pack(&group.map(|s| s.received));
            assert!(kernels.zf_x4(&h4, &y4, 1.0).unpack().iter().all(|x| !x.is_finite()));
        }
    }
}

#[test]
fn test_zf_fixed_channel() {
    // H = [[2, i], [0, 1]], det = 2
    let c = Complex32::new;
    let h = Channel::new(c(2.0, 0.0), c(0.0, 1.0), c(0.0, 0.0), c(1.0, 0.0));
    let x = Symbols::new(c(1.0, -1.0), c(0.5, 0.5));
    let y = h.apply(&x);

    let recovered = kernels().zf_x1(&h, &y, 1.0);
    assert_eq!(recovered, x);
}
