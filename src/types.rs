#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Unit-free heading vector: `(cos angle, sin angle) * length`.
    pub fn from_angle(angle: f64, length: f64) -> Self {
        Vector2D::new(angle.cos() * length, angle.sin() * length)
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }

    pub fn add(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: Vector2D) -> Self {
        Vector2D::new(self.x - other.x, self.y - other.y)
    }

    pub fn dot(&self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    pub fn distance(&self, other: Vector2D) -> f64 {
        self.sub(other).length()
    }

    pub fn angle_to(&self, other: Vector2D) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn midpoint(&self, other: Vector2D) -> Self {
        Vector2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Teleport to the opposite edge once the value leaves `[-margin, max + margin]`.
pub fn wrap_with_margin(value: f64, max: f64, margin: f64) -> f64 {
    if value < -margin {
        max + margin
    } else if value > max + margin {
        -margin
    } else {
        value
    }
}

/// Toroidal wrap of a position; `margin` is how far past an edge the body may
/// travel before it reappears on the other side.
pub fn wrap_position(position: Vector2D, width: f64, height: f64, margin: f64) -> Vector2D {
    Vector2D::new(
        wrap_with_margin(position.x, width, margin),
        wrap_with_margin(position.y, height, margin),
    )
}

pub fn is_outside(position: Vector2D, width: f64, height: f64, padding: f64) -> bool {
    position.x < -padding
        || position.x > width + padding
        || position.y < -padding
        || position.y > height + padding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_crossing_left_edge_lands_on_right() {
        assert_eq!(wrap_with_margin(-1.0, 800.0, 0.0), 800.0);
        assert_eq!(wrap_with_margin(801.0, 800.0, 0.0), 0.0);
    }

    #[test]
    fn wrap_margin_keeps_body_until_fully_clear() {
        assert_eq!(wrap_with_margin(-30.0, 800.0, 50.0), -30.0);
        assert_eq!(wrap_with_margin(-51.0, 800.0, 50.0), 850.0);
        assert_eq!(wrap_with_margin(851.0, 800.0, 50.0), -50.0);
    }

    #[test]
    fn distance_and_heading() {
        let a = Vector2D::new(0.0, 0.0);
        let b = Vector2D::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert!((a.angle_to(Vector2D::new(0.0, 1.0)) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(a.midpoint(b), Vector2D::new(1.5, 2.0));
    }

    #[test]
    fn padded_bounds() {
        assert!(!is_outside(Vector2D::new(-5.0, 10.0), 100.0, 100.0, 10.0));
        assert!(is_outside(Vector2D::new(-11.0, 10.0), 100.0, 100.0, 10.0));
        assert!(is_outside(Vector2D::new(50.0, 101.0), 100.0, 100.0, 0.0));
    }
}
