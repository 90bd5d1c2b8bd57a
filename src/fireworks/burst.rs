use std::f64::consts::TAU;

use fastrand::Rng;

use super::particle::Particle;
use super::surface::Viewport;

pub const PALETTE: [&str; 6] = ["#ff5252", "#ffd754", "#7cff6b", "#5ad7ff", "#b77bff", "#ff8ed1"];
/// Upper bound of the random offset added to each evenly spaced direction.
pub const DIRECTION_JITTER: f64 = 0.15;
pub const SPEED_RANGE: (f64, f64) = (2.2, 5.0);
pub const LIFESPAN_RANGE_MS: (f64, f64) = (900.0, 1500.0);
pub const SIZE_RANGE: (f64, f64) = (2.0, 3.6);

const ORIGIN_PADDING: f64 = 80.0;
const ORIGIN_HEIGHT_FRACTION: f64 = 0.6;

fn uniform(rng: &mut Rng, range: (f64, f64)) -> f64 {
    range.0 + rng.f64() * (range.1 - range.0)
}

/// Appends `count` particles leaving `(x, y)` in evenly spaced directions.
/// The whole burst shares one palette color.
pub fn emit_burst(particles: &mut Vec<Particle>, x: f64, y: f64, count: usize, rng: &mut Rng) {
    let color = PALETTE[rng.usize(..PALETTE.len())];
    particles.reserve(count);

    for i in 0..count {
        let angle = (i as f64 / count as f64) * TAU + rng.f64() * DIRECTION_JITTER;
        let speed = uniform(rng, SPEED_RANGE);
        particles.push(Particle {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            age: 0.0,
            lifespan: uniform(rng, LIFESPAN_RANGE_MS),
            color,
            size: uniform(rng, SIZE_RANGE),
            alpha: 1.0,
        });
    }
}

/// Random burst origin inside the padded upper part of the viewport.
pub fn random_origin(viewport: Viewport, rng: &mut Rng) -> (f64, f64) {
    let span_x = (viewport.width - ORIGIN_PADDING * 2.0).max(0.0);
    let span_y = (viewport.height * ORIGIN_HEIGHT_FRACTION - ORIGIN_PADDING).max(0.0);
    (
        ORIGIN_PADDING + rng.f64() * span_x,
        ORIGIN_PADDING + rng.f64() * span_y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(seed: u64) -> Vec<Particle> {
        let mut rng = Rng::with_seed(seed);
        let mut particles = Vec::new();
        emit_burst(&mut particles, 400.0, 300.0, 90, &mut rng);
        particles
    }

    #[test]
    fn burst_shares_origin_and_color() {
        let particles = burst(7);
        assert_eq!(particles.len(), 90);

        let color = particles[0].color;
        assert!(PALETTE.contains(&color));
        for p in &particles {
            assert_eq!((p.x, p.y), (400.0, 300.0));
            assert_eq!(p.color, color);
            assert_eq!(p.age, 0.0);
        }
    }

    #[test]
    fn directions_stay_within_jitter_of_their_slot() {
        for seed in 1..=25 {
            let particles = burst(seed);
            let count = particles.len() as f64;

            for (i, p) in particles.iter().enumerate() {
                let slot = i as f64 / count * TAU;
                let offset = (p.vy.atan2(p.vx) - slot).rem_euclid(TAU);
                assert!(
                    offset <= DIRECTION_JITTER + 1e-9,
                    "seed {seed}: particle {i} is {offset} rad past its slot"
                );
            }
        }
    }

    #[test]
    fn jitter_is_spread_across_its_range() {
        let mut offsets = Vec::new();
        for seed in 1..=20 {
            for (i, p) in burst(seed).iter().enumerate() {
                let slot = i as f64 / 90.0 * TAU;
                offsets.push((p.vy.atan2(p.vx) - slot).rem_euclid(TAU));
            }
        }

        let mean = offsets.iter().sum::<f64>() / offsets.len() as f64;
        assert!((mean - DIRECTION_JITTER / 2.0).abs() < 0.01, "mean jitter was {mean}");
    }

    #[test]
    fn speed_lifespan_and_size_stay_in_range() {
        for p in burst(99) {
            let speed = p.vx.hypot(p.vy);
            assert!(speed >= SPEED_RANGE.0 - 1e-9 && speed <= SPEED_RANGE.1 + 1e-9);
            assert!(p.lifespan >= LIFESPAN_RANGE_MS.0 && p.lifespan <= LIFESPAN_RANGE_MS.1);
            assert!(p.size >= SIZE_RANGE.0 && p.size <= SIZE_RANGE.1);
        }
    }

    #[test]
    fn origin_lands_in_the_upper_part_of_the_viewport() {
        let viewport = Viewport::new(1280.0, 720.0, 2.0);
        let mut rng = Rng::with_seed(3);

        for _ in 0..200 {
            let (x, y) = random_origin(viewport, &mut rng);
            assert!((80.0..=1200.0).contains(&x));
            assert!((80.0..=432.0).contains(&y));
        }
    }

    #[test]
    fn tiny_viewport_pins_origin_to_the_padding() {
        let viewport = Viewport::new(100.0, 100.0, 1.0);
        let mut rng = Rng::with_seed(11);
        assert_eq!(random_origin(viewport, &mut rng), (80.0, 80.0));
    }
}
