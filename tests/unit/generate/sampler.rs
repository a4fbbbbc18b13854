use super::*;
use crate::foundation::rng::Rng64;

/// Always returns the same sample, so every candidate lands on the same spot.
struct Stuck(f64);

impl RandomSource for Stuck {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

#[test]
fn target_count_has_floor_of_nine() {
    let opts = SamplerOpts::default();
    assert_eq!(opts.target_count(1), 9);
    assert_eq!(opts.target_count(5), 9);
    assert_eq!(opts.target_count(6), 10);
    assert_eq!(opts.target_count(10), 17);
}

#[test]
fn accepted_points_respect_their_tier_distance() {
    for seed in 0..50 {
        let mut rng = Rng64::new(seed);
        let pts = sample_seed_points(1920, 1080, 8, 100.0, &SamplerOpts::default(), &mut rng);
        assert!(!pts.is_empty());
        for (j, later) in pts.iter().enumerate() {
            let expected = match later.tier {
                Tier::Inside => 1920.0 * 0.27,
                Tier::Outside => 1920.0 * 0.52,
            };
            assert!((later.min_dist - expected).abs() < 1e-9);
            for earlier in &pts[..j] {
                assert!(earlier.point.distance(later.point) >= later.min_dist);
            }
        }
    }
}

#[test]
fn points_stay_inside_the_edge_margin() {
    let mut rng = Rng64::new(9);
    let margin = 1080.0 * 0.05;
    for p in sample_points(1920, 1080, 12, 100.0, &mut rng) {
        assert!(p.x >= margin && p.x <= 1920.0 - margin);
        assert!(p.y >= margin && p.y <= 1080.0 - margin);
    }
}

#[test]
fn exhausted_attempts_drop_points_silently() {
    let mut rng = Stuck(0.5);
    let pts = sample_points(800, 600, 5, 100.0, &mut rng);
    assert_eq!(pts, vec![Point::new(400.0, 300.0)]);
}

#[test]
fn larger_spread_spaces_seeds_further_apart() {
    let mut rng = Rng64::new(4);
    let pts = sample_seed_points(1000, 1000, 4, 150.0, &SamplerOpts::default(), &mut rng);
    assert!((pts[0].min_dist - 1000.0 * 0.27 * 1.5).abs() < 1e-9);
}

#[test]
fn sampling_is_reproducible_for_a_seed() {
    let a = sample_points(1280, 720, 6, 100.0, &mut Rng64::new(77));
    let b = sample_points(1280, 720, 6, 100.0, &mut Rng64::new(77));
    assert_eq!(a, b);
}
