use super::particle::Particle;

/// Size of the page viewport in CSS pixels plus the device pixel ratio used
/// for the backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };

        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Backing store size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }
}

/// A drawable overlay. Coordinates passed to it are always CSS pixels; the
/// surface owns the mapping to device pixels, which is why a resize never
/// needs to touch particle positions.
pub trait Surface {
    fn resize(&mut self, viewport: Viewport);

    /// Darkens the previous frame with a translucent black fill, then leaves
    /// additive blending on for the particles drawn after it.
    fn fade(&mut self, opacity: f64);

    fn draw_particle(&mut self, particle: &Particle);

    /// Takes the surface off the page. Nothing is drawn afterwards.
    fn release(&mut self);
}

/// Creates the overlay surface on demand.
pub trait SurfaceHost {
    type Surface: Surface;

    /// `None` when no drawing context can be had; the caller stays idle.
    fn acquire(&mut self, viewport: Viewport) -> Option<Self::Surface>;
}
