#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    /// Added to the vertical velocity once per frame.
    pub gravity: f64,
    /// Velocity multiplier applied once per frame.
    pub friction: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Milliseconds since the burst.
    pub age: f64,
    /// Milliseconds the particle is allowed to live.
    pub lifespan: f64,
    pub color: &'static str,
    pub size: f64,
    pub alpha: f64,
}

impl Particle {
    pub fn is_expired(&self) -> bool {
        self.age > self.lifespan
    }

    /// Ages the particle by `dt` milliseconds and, while it is still alive,
    /// integrates one frame of motion. Returns `false` once it has expired, in
    /// which case nothing but the age was touched.
    pub fn advance(&mut self, dt: f64, physics: Physics) -> bool {
        self.age += dt;
        if self.is_expired() {
            return false;
        }

        self.vx *= physics.friction;
        self.vy = self.vy * physics.friction + physics.gravity;
        self.x += self.vx;
        self.y += self.vy;
        self.alpha = (1.0 - self.age / self.lifespan).max(0.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHYSICS: Physics = Physics {
        gravity: 0.08,
        friction: 0.985,
    };

    fn particle() -> Particle {
        Particle {
            x: 100.0,
            y: 100.0,
            vx: 2.0,
            vy: -4.0,
            age: 0.0,
            lifespan: 1000.0,
            color: "#ffd754",
            size: 2.5,
            alpha: 1.0,
        }
    }

    #[test]
    fn advance_applies_drag_then_gravity() {
        let mut p = particle();
        assert!(p.advance(16.0, PHYSICS));

        assert!((p.vx - 1.97).abs() < 1e-9);
        assert!((p.vy - (-4.0 * 0.985 + 0.08)).abs() < 1e-9);
        assert!((p.x - 101.97).abs() < 1e-9);
        assert!((p.y - (100.0 + p.vy)).abs() < 1e-9);
        assert!((p.alpha - 0.984).abs() < 1e-9);
    }

    #[test]
    fn particle_lives_through_its_exact_lifespan() {
        let mut p = particle();
        assert!(p.advance(1000.0, PHYSICS));
        assert_eq!(p.alpha, 0.0);
        assert!(!p.advance(0.5, PHYSICS));
    }

    #[test]
    fn expired_particle_keeps_its_last_motion_state() {
        let mut p = particle();
        let before = p.clone();
        assert!(!p.advance(5_000.0, PHYSICS));
        assert_eq!(p.x, before.x);
        assert_eq!(p.vy, before.vy);
        assert_eq!(p.age, 5_000.0);
    }
}
