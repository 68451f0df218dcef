/*
 * Renderer Module
 *
 * The simulation draws through the `Surface` trait: a cleared 2D plane with
 * pixel dimensions, origin in the top-left corner and y growing downwards,
 * that can fill rotated triangles (boids) and circles (particles).
 *
 * `NannouSurface` maps that plane onto a nannou `Draw`, whose origin is the
 * window centre with y growing upwards.
 */

use nannou::color::{hsla, Hsla};
use nannou::prelude::*;

// HSL colour with the hue in turns (0.0..1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl Tint {
    pub fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue: hue.rem_euclid(1.0),
            saturation: saturation.clamp(0.0, 1.0),
            lightness: lightness.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Hsla {
        hsla(self.hue, self.saturation, self.lightness, alpha.clamp(0.0, 1.0))
    }
}

pub trait Surface {
    // Width and height in pixels
    fn size(&self) -> (f32, f32);

    fn clear(&mut self);

    // Arrow-shaped triangle pointing along `rotation`, scaled by `size`
    fn fill_triangle(&mut self, position: Vec2, rotation: f32, size: f32, tint: Tint, opacity: f32);

    fn fill_circle(&mut self, position: Vec2, radius: f32, tint: Tint, opacity: f32);
}

// Vertices of the boid glyph before rotation: nose at +x, tail at -x
pub fn triangle_points(size: f32) -> [Vec2; 3] {
    [
        vec2(size * 2.0, 0.0),
        vec2(-size, -size),
        vec2(-size, size),
    ]
}

pub struct NannouSurface<'a> {
    draw: &'a Draw,
    rect: Rect,
}

impl<'a> NannouSurface<'a> {
    pub fn new(draw: &'a Draw, rect: Rect) -> Self {
        Self { draw, rect }
    }

    // Top-left, y-down plane coordinates to nannou's centred, y-up space
    pub fn to_screen(&self, position: Vec2) -> Vec2 {
        vec2(self.rect.left() + position.x, self.rect.top() - position.y)
    }
}

impl Surface for NannouSurface<'_> {
    fn size(&self) -> (f32, f32) {
        (self.rect.w(), self.rect.h())
    }

    fn clear(&mut self) {
        self.draw.background().color(BLACK);
    }

    fn fill_triangle(&mut self, position: Vec2, rotation: f32, size: f32, tint: Tint, opacity: f32) {
        // Flipping the y axis mirrors the rotation direction
        let points = triangle_points(size).map(|p| pt2(p.x, -p.y));
        self.draw
            .polygon()
            .color(tint.with_alpha(opacity))
            .points(points)
            .xy(self.to_screen(position))
            .rotate(-rotation);
    }

    fn fill_circle(&mut self, position: Vec2, radius: f32, tint: Tint, opacity: f32) {
        self.draw
            .ellipse()
            .xy(self.to_screen(position))
            .radius(radius)
            .color(tint.with_alpha(opacity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_wraps_hue_and_clamps_channels() {
        let tint = Tint::new(1.25, 1.5, -0.2);
        assert!((tint.hue - 0.25).abs() < 1e-6);
        assert_eq!(tint.saturation, 1.0);
        assert_eq!(tint.lightness, 0.0);
    }

    #[test]
    fn triangle_nose_points_forward() {
        let [nose, left, right] = triangle_points(3.0);
        assert_eq!(nose, vec2(6.0, 0.0));
        assert_eq!(left, vec2(-3.0, -3.0));
        assert_eq!(right, vec2(-3.0, 3.0));
    }

    #[test]
    fn plane_origin_maps_to_window_top_left() {
        let draw = Draw::new();
        let rect = Rect::from_w_h(800.0, 600.0);
        let surface = NannouSurface::new(&draw, rect);

        assert_eq!(surface.to_screen(vec2(0.0, 0.0)), vec2(-400.0, 300.0));
        assert_eq!(surface.to_screen(vec2(800.0, 600.0)), vec2(400.0, -300.0));
        assert_eq!(surface.size(), (800.0, 600.0));
    }
}
