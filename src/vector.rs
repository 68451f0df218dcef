/*
 * Vector Module
 *
 * Steering helpers layered over nannou's `Vec2`. Every operation returns a
 * new value so forces can be accumulated without side effects.
 */

use nannou::prelude::*;

pub trait Steer: Sized {
    // Unit vector in the same direction, or zero for a zero-length input
    fn normalized_or_zero(self) -> Self;

    // Rescale to `max` if the magnitude exceeds it
    fn limit(self, max: f32) -> Self;

    // Angle of the vector in radians, measured from the +x axis
    fn heading(self) -> f32;
}

impl Steer for Vec2 {
    fn normalized_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self / len
        } else {
            Vec2::ZERO
        }
    }

    fn limit(self, max: f32) -> Self {
        if self.length() > max {
            self.normalized_or_zero() * max
        } else {
            self
        }
    }

    fn heading(self) -> f32 {
        self.y.atan2(self.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn normalizing_zero_vector_yields_zero() {
        assert_eq!(Vec2::ZERO.normalized_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn normalized_vector_has_unit_length() {
        let v = vec2(3.0, 4.0).normalized_or_zero();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn limit_leaves_short_vectors_alone() {
        let v = vec2(0.01, 0.02);
        assert_eq!(v.limit(1.0), v);
    }

    #[test]
    fn limit_rescales_long_vectors() {
        let v = vec2(30.0, 40.0).limit(5.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
        assert!((v.x - 3.0).abs() < 1e-5);
        assert!((v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn heading_follows_atan2() {
        assert!((vec2(0.0, 1.0).heading() - PI / 2.0).abs() < 1e-6);
        assert!((vec2(-1.0, 0.0).heading() - PI).abs() < 1e-6);
    }
}
