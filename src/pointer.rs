//! Geometry for the hover effects. Inputs are client coordinates and the
//! element's bounding rectangle; outputs are CSS transforms.

pub const TILT_PERSPECTIVE_PX: f64 = 700.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Pointer offset relative to the element's top-left corner, where the
/// ripple is centred.
pub fn ripple_origin(rect: &Rect, client_x: f64, client_y: f64) -> (f64, f64) {
    (client_x - rect.left, client_y - rect.top)
}

/// `(rotate_x, rotate_y)` in degrees. Zero-sized elements do not tilt.
pub fn tilt_angles(rect: &Rect, client_x: f64, client_y: f64, max_degrees: f64) -> (f64, f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return (0.0, 0.0);
    }

    let x = (client_x - rect.left) / rect.width;
    let y = (client_y - rect.top) / rect.height;
    ((0.5 - y) * max_degrees, (x - 0.5) * max_degrees)
}

pub fn tilt_transform(rotate_x: f64, rotate_y: f64) -> String {
    format!(
        "perspective({TILT_PERSPECTIVE_PX}px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) translateZ(0)"
    )
}

/// Translation toward the pointer, each axis capped at `strength` pixels.
pub fn magnetic_offset(rect: &Rect, client_x: f64, client_y: f64, strength: f64) -> (f64, f64) {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return (0.0, 0.0);
    }

    let (center_x, center_y) = rect.center();
    let x = (client_x - center_x) / (rect.width / 2.0);
    let y = (client_y - center_y) / (rect.height / 2.0);
    (x.clamp(-1.0, 1.0) * strength, y.clamp(-1.0, 1.0) * strength)
}

pub fn translate_transform(x: f64, y: f64) -> String {
    format!("translate({x}px, {y}px)")
}
