//! The fireworks easter egg: bursts of fading particles drawn on a
//! full-viewport overlay, switched on and off by a secret word or a
//! double-click on the logo.
//!
//! [`Fireworks`] owns every live particle and the overlay surface and is the
//! only thing that touches them. [`FireworksHandle`] shares it with the event
//! listeners and keeps the frame loop going through a [`FrameScheduler`].

mod burst;
mod particle;
mod scheduler;
mod secret;
mod surface;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fastrand::Rng;

use crate::config::FireworksConfig;

use burst::{emit_burst, random_origin};
use particle::Physics;

pub use particle::Particle;
pub use scheduler::{FrameCallback, FrameScheduler};
pub use secret::{KeyTarget, SecretSequence};
pub use surface::{Surface, SurfaceHost, Viewport};

#[cfg(test)]
pub use scheduler::ManualScheduler;

struct Running<T> {
    surface: T,
    viewport: Viewport,
    last_frame: f64,
    spawn_timer: f64,
    particles: Vec<Particle>,
}

pub struct Fireworks<H: SurfaceHost, S: FrameScheduler> {
    config: FireworksConfig,
    host: H,
    scheduler: S,
    rng: Rng,
    running: Option<Running<H::Surface>>,
}

impl<H: SurfaceHost, S: FrameScheduler> Fireworks<H, S> {
    pub fn new(config: FireworksConfig, host: H, scheduler: S, rng: Rng) -> Self {
        Self {
            config,
            host,
            scheduler,
            rng,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn particles(&self) -> &[Particle] {
        self.running
            .as_ref()
            .map(|running| running.particles.as_slice())
            .unwrap_or_default()
    }

    fn physics(&self) -> Physics {
        Physics {
            gravity: self.config.gravity,
            friction: self.config.friction,
        }
    }

    /// Acquires the surface and fires the opening burst. Frame scheduling is
    /// left to the caller. Returns `false` if already running or when no
    /// surface is available.
    pub fn start(&mut self, now: f64, viewport: Viewport) -> bool {
        if self.running.is_some() {
            return false;
        }

        let Some(mut surface) = self.host.acquire(viewport) else {
            log::debug!("fireworks: no drawing surface available, staying off");
            return false;
        };
        surface.resize(viewport);

        let mut particles = Vec::with_capacity(self.config.burst_size * 4);
        let (x, y) = random_origin(viewport, &mut self.rng);
        emit_burst(&mut particles, x, y, self.config.burst_size, &mut self.rng);

        self.running = Some(Running {
            surface,
            viewport,
            last_frame: now,
            spawn_timer: 0.0,
            particles,
        });
        true
    }

    /// Cancels the pending frame before anything else, then drops the
    /// particles and takes the surface down.
    pub fn stop(&mut self) {
        self.scheduler.cancel();
        if let Some(mut running) = self.running.take() {
            running.surface.release();
        }
    }

    /// Resizes the backing store. Particles keep their logical positions.
    pub fn resize(&mut self, viewport: Viewport) {
        if let Some(running) = self.running.as_mut() {
            running.viewport = viewport;
            running.surface.resize(viewport);
        }
    }

    /// Renders one frame at timestamp `now` (milliseconds). Returns `false`
    /// when the system is off and no further frame should follow.
    pub fn step(&mut self, now: f64) -> bool {
        let physics = self.physics();
        let Some(running) = self.running.as_mut() else {
            return false;
        };

        let dt = (now - running.last_frame).max(0.0);
        running.last_frame = now;

        running.surface.fade(self.config.fade_opacity);

        running.spawn_timer += dt;
        if running.spawn_timer > self.config.spawn_interval_ms {
            let (x, y) = random_origin(running.viewport, &mut self.rng);
            emit_burst(&mut running.particles, x, y, self.config.burst_size, &mut self.rng);
            running.spawn_timer = 0.0;
        }

        let Running {
            surface, particles, ..
        } = running;
        particles.retain_mut(|particle| {
            if !particle.advance(dt, physics) {
                return false;
            }
            surface.draw_particle(particle);
            true
        });

        true
    }
}

/// Shared handle used by the page's event listeners.
pub struct FireworksHandle<H, S>
where
    H: SurfaceHost + 'static,
    H::Surface: 'static,
    S: FrameScheduler + 'static,
{
    engine: Rc<RefCell<Fireworks<H, S>>>,
}

impl<H, S> Clone for FireworksHandle<H, S>
where
    H: SurfaceHost + 'static,
    H::Surface: 'static,
    S: FrameScheduler + 'static,
{
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
        }
    }
}

impl<H, S> FireworksHandle<H, S>
where
    H: SurfaceHost + 'static,
    H::Surface: 'static,
    S: FrameScheduler + 'static,
{
    pub fn new(fireworks: Fireworks<H, S>) -> Self {
        Self {
            engine: Rc::new(RefCell::new(fireworks)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.engine.borrow().is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.engine.borrow().particles().len()
    }

    /// Flips between off and running. Returns whether it is running now.
    pub fn toggle(&self, now: f64, viewport: Viewport) -> bool {
        let mut engine = self.engine.borrow_mut();

        if engine.is_running() {
            engine.stop();
            log::info!("fireworks: off");
            return false;
        }

        if !engine.start(now, viewport) {
            return false;
        }

        let callback = frame_callback(Rc::downgrade(&self.engine));
        engine.scheduler.schedule_next(callback);
        log::info!("fireworks: on");
        true
    }

    pub fn resize(&self, viewport: Viewport) {
        self.engine.borrow_mut().resize(viewport);
    }
}

// The callback only holds a weak reference so a pending frame never keeps a
// dropped handle alive.
fn frame_callback<H, S>(engine: Weak<RefCell<Fireworks<H, S>>>) -> FrameCallback
where
    H: SurfaceHost + 'static,
    H::Surface: 'static,
    S: FrameScheduler + 'static,
{
    Box::new(move |now| {
        let Some(strong) = engine.upgrade() else {
            return;
        };

        let mut fireworks = strong.borrow_mut();
        if fireworks.step(now) {
            fireworks.scheduler.schedule_next(frame_callback(engine));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct SurfaceLog {
        acquired: usize,
        released: usize,
        resizes: Vec<Viewport>,
        fades: usize,
        drawn_last_frame: usize,
        drawn_after_release: usize,
    }

    struct RecordingSurface {
        log: Rc<RefCell<SurfaceLog>>,
        released: bool,
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, viewport: Viewport) {
            self.log.borrow_mut().resizes.push(viewport);
        }

        fn fade(&mut self, _opacity: f64) {
            let mut log = self.log.borrow_mut();
            log.fades += 1;
            log.drawn_last_frame = 0;
        }

        fn draw_particle(&mut self, particle: &Particle) {
            assert!(particle.age <= particle.lifespan);
            let mut log = self.log.borrow_mut();
            if self.released {
                log.drawn_after_release += 1;
            }
            log.drawn_last_frame += 1;
        }

        fn release(&mut self) {
            self.released = true;
            self.log.borrow_mut().released += 1;
        }
    }

    struct TestHost {
        available: bool,
        log: Rc<RefCell<SurfaceLog>>,
    }

    impl SurfaceHost for TestHost {
        type Surface = RecordingSurface;

        fn acquire(&mut self, _viewport: Viewport) -> Option<RecordingSurface> {
            if !self.available {
                return None;
            }
            self.log.borrow_mut().acquired += 1;
            Some(RecordingSurface {
                log: Rc::clone(&self.log),
                released: false,
            })
        }
    }

    struct Rig {
        handle: FireworksHandle<TestHost, ManualScheduler>,
        frames: ManualScheduler,
        log: Rc<RefCell<SurfaceLog>>,
    }

    fn rig_with(config: FireworksConfig, available: bool) -> Rig {
        let log = Rc::new(RefCell::new(SurfaceLog::default()));
        let frames = ManualScheduler::default();
        let host = TestHost {
            available,
            log: Rc::clone(&log),
        };
        let fireworks = Fireworks::new(config, host, frames.clone(), Rng::with_seed(42));

        Rig {
            handle: FireworksHandle::new(fireworks),
            frames,
            log,
        }
    }

    fn rig() -> Rig {
        rig_with(FireworksConfig::default(), true)
    }

    fn viewport() -> Viewport {
        Viewport::new(1280.0, 720.0, 2.0)
    }

    fn ages(rig: &Rig) -> Vec<(f64, f64)> {
        rig.handle
            .engine
            .borrow()
            .particles()
            .iter()
            .map(|p| (p.age, p.lifespan))
            .collect()
    }

    #[test]
    fn toggle_on_emits_a_burst_and_schedules_a_frame() {
        let rig = rig();
        assert!(rig.handle.toggle(0.0, viewport()));

        assert!(rig.handle.is_running());
        assert_eq!(rig.handle.particle_count(), 90);
        assert!(rig.frames.is_pending());
        assert_eq!(rig.log.borrow().acquired, 1);
        assert_eq!(rig.log.borrow().resizes, vec![viewport()]);
    }

    #[test]
    fn toggle_on_then_off_leaves_nothing_behind() {
        let rig = rig();
        rig.handle.toggle(0.0, viewport());
        assert!(!rig.handle.toggle(1.0, viewport()));

        assert!(!rig.handle.is_running());
        assert_eq!(rig.handle.particle_count(), 0);
        assert!(!rig.frames.is_pending());
        assert!(!rig.frames.fire(16.0));
        assert_eq!(rig.log.borrow().released, 1);
        assert_eq!(rig.log.borrow().fades, 0);
    }

    #[test]
    fn missing_surface_keeps_everything_off() {
        let rig = rig_with(FireworksConfig::default(), false);
        assert!(!rig.handle.toggle(0.0, viewport()));

        assert!(!rig.handle.is_running());
        assert_eq!(rig.handle.particle_count(), 0);
        assert!(!rig.frames.is_pending());
    }

    #[test]
    fn each_frame_schedules_the_next() {
        let rig = rig();
        rig.handle.toggle(0.0, viewport());

        for frame in 1..=5 {
            assert!(rig.frames.fire(frame as f64 * 16.0));
            assert!(rig.frames.is_pending());
        }
        assert_eq!(rig.log.borrow().fades, 5);
        assert_eq!(rig.log.borrow().drawn_last_frame, 90);
    }

    #[test]
    fn bursts_spawn_after_the_interval() {
        let rig = rig();
        rig.handle.toggle(0.0, viewport());

        for now in [100.0, 200.0, 300.0] {
            rig.frames.fire(now);
        }
        assert_eq!(rig.handle.particle_count(), 90);

        rig.frames.fire(400.0);
        assert_eq!(rig.handle.particle_count(), 180);
        assert_eq!(rig.log.borrow().drawn_last_frame, 180);
    }

    #[test]
    fn drawn_set_matches_live_particles_and_ages_never_decrease() {
        let config = FireworksConfig {
            spawn_interval_ms: 5_000.0,
            ..FireworksConfig::default()
        };
        let rig = rig_with(config, true);
        rig.handle.toggle(0.0, viewport());

        let mut clock = Rng::with_seed(5);
        let mut now = 0.0;
        while now < 4_000.0 {
            let dt = clock.f64() * 120.0;
            let before = ages(&rig);
            let expected: Vec<(f64, f64)> = before
                .iter()
                .map(|(age, lifespan)| (age + dt, *lifespan))
                .filter(|(age, lifespan)| age <= lifespan)
                .collect();

            now += dt;
            rig.frames.fire(now);

            let after = ages(&rig);
            assert_eq!(after.len(), expected.len());
            for ((age, _), (expected_age, _)) in after.iter().zip(&expected) {
                assert!((age - expected_age).abs() < 1e-6);
            }
            assert!(after.iter().all(|(age, lifespan)| age <= lifespan));
            assert_eq!(rig.log.borrow().drawn_last_frame, after.len());
        }

        assert_eq!(rig.handle.particle_count(), 0);
    }

    #[test]
    fn clock_going_backwards_does_not_age_particles() {
        let rig = rig();
        rig.handle.toggle(100.0, viewport());
        rig.frames.fire(116.0);
        rig.frames.fire(50.0);
        assert!(ages(&rig).iter().all(|(age, _)| *age == 16.0));

        rig.frames.fire(116.0);
        assert!(ages(&rig).iter().all(|(age, _)| *age == 82.0));
    }

    #[test]
    fn long_pause_ages_everything_out() {
        let rig = rig();
        rig.handle.toggle(0.0, viewport());
        rig.frames.fire(16.0);
        rig.frames.fire(60_000.0);

        assert_eq!(rig.handle.particle_count(), 0);
        assert!(rig.handle.is_running());
        assert!(rig.frames.is_pending());

        rig.frames.fire(60_016.0);
        rig.frames.fire(60_420.0);
        assert_eq!(rig.handle.particle_count(), 90);
    }

    #[test]
    fn resize_keeps_particle_positions() {
        let rig = rig();
        rig.handle.toggle(0.0, viewport());
        rig.frames.fire(16.0);

        let positions: Vec<(f64, f64)> = rig
            .handle
            .engine
            .borrow()
            .particles()
            .iter()
            .map(|p| (p.x, p.y))
            .collect();

        let smaller = Viewport::new(640.0, 480.0, 1.0);
        rig.handle.resize(smaller);

        let after: Vec<(f64, f64)> = rig
            .handle
            .engine
            .borrow()
            .particles()
            .iter()
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(positions, after);
        assert_eq!(rig.log.borrow().resizes.last(), Some(&smaller));
    }

    #[test]
    fn off_stops_drawing() {
        let rig = rig();
        rig.handle.toggle(0.0, viewport());
        rig.frames.fire(16.0);
        rig.handle.toggle(20.0, viewport());

        assert!(!rig.frames.fire(32.0));
        assert_eq!(rig.log.borrow().drawn_after_release, 0);

        assert!(rig.handle.toggle(40.0, viewport()));
        assert_eq!(rig.log.borrow().acquired, 2);
        assert_eq!(rig.handle.particle_count(), 90);
    }

    #[test]
    fn dropped_handle_turns_pending_frame_into_a_no_op() {
        let rig = rig();
        rig.handle.toggle(0.0, viewport());
        let Rig { handle, frames, log } = rig;
        drop(handle);

        assert!(frames.fire(16.0));
        assert_eq!(log.borrow().fades, 0);
        assert!(!frames.is_pending());
    }
}
