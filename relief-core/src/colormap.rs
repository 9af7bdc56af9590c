//! Elevation colormap for the top surface.

/// Color given to every bottom vertex
pub const BASE_COLOR: [f32; 3] = [0.6, 0.6, 0.6];

// Per channel: base + a * t^p + b * t
const RED: Channel = Channel { base: 0.05, a: 0.85, p: 1.6, b: 0.05 };
const GREEN: Channel = Channel { base: 0.25, a: 0.55, p: 0.7, b: 0.12 };
const BLUE: Channel = Channel { base: 0.35, a: -0.45, p: 0.5, b: 0.95 };

struct Channel {
    base: f32,
    a: f32,
    p: f32,
    b: f32,
}

impl Channel {
    fn eval(&self, t: f32) -> f32 {
        (self.base + self.a * t.powf(self.p) + self.b * t).clamp(0.0, 1.0)
    }
}

/// Map a normalized elevation `t` to an RGB triple, each channel in `[0, 1]`.
///
/// Low ground is a deep blue-green, rising through green and tan towards a
/// pale near-white at the top of the range. Out-of-range input is clamped and
/// NaN is treated as zero.
pub fn colormap(t: f32) -> [f32; 3] {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    [RED.eval(t), GREEN.eval(t), BLUE.eval(t)]
}
