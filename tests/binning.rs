use light_curve_transit::*;
use light_curve_transit_test_util::{SyntheticTransit, noisy_transit_ts};

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TRANSIT: SyntheticTransit = SyntheticTransit {
    period: 3.2,
    epoch: 1.7,
    duration: 0.2,
    depth: 0.01,
};

#[test]
fn binned_statistics_are_bounded() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut ts = noisy_transit_ts(&TRANSIT, &mut rng, 5000, 0.0, 27.0, 1e-3);
    let (t_min, t_max) = ts.time_range().unwrap();
    let binner = TimeBinner::new(0.5).unwrap();
    let binned = binner.bin(&mut ts).unwrap();

    assert!(!binned.is_empty());
    assert!(binned.len() <= ((t_max - t_min) / 0.5).ceil() as usize);
    assert!(binned.t.iter().all(|&t| t >= t_min && t <= t_max));
    assert!(binned.t.windows(2).into_iter().all(|w| w[0] < w[1]));
    assert!(binned.err.iter().all(|&err| err.is_finite() && err >= 0.0));
}

#[test]
fn bins_count_all_observations() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut ts = noisy_transit_ts(&TRANSIT, &mut rng, 1000, 0.0, 10.0, 1e-3);
    let bins = TimeBinner::new(0.37).unwrap().bins(&mut ts).unwrap();
    assert_eq!(bins.iter().map(|bin| bin.count).sum::<usize>(), 1000);
}

#[test]
fn folded_transit_depth() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut ts = noisy_transit_ts(&TRANSIT, &mut rng, 20000, 0.0, 27.0, 1e-3);
    let folder = PhaseFolder::new(TRANSIT.period, TRANSIT.epoch).unwrap();
    let binner = TimeBinner::new(0.05).unwrap();
    let binned = folder.fold_and_bin(&mut ts, &binner).unwrap();

    // Bins fully inside or fully outside of the transit
    for (&t, &m) in binned.t.iter().zip(binned.m.iter()) {
        if t.abs() < 0.5 * TRANSIT.duration - 0.05 {
            assert_relative_eq!(m, 1.0 - TRANSIT.depth, epsilon = 1e-3);
        } else if t.abs() > 0.5 * TRANSIT.duration + 0.05 {
            assert_relative_eq!(m, 1.0, epsilon = 1e-3);
        }
    }
    assert!(binned.t.iter().all(|&t| t.abs() <= 0.5 * TRANSIT.period));
}

#[test]
fn f32_binning() {
    let t: Vec<f32> = (0..100).map(|i| 0.1 * i as f32).collect();
    let m = vec![2.0_f32; 100];
    let binned = TimeBinner::new(1.0)
        .unwrap()
        .bin(&mut TimeSeries::new(&t, &m))
        .unwrap();
    assert!(!binned.is_empty());
    for (&m, &err) in binned.m.iter().zip(binned.err.iter()) {
        assert_relative_eq!(m, 2.0);
        assert_relative_eq!(err, 0.0);
    }
}
