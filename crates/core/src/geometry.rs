//! 3D placement and link geometry

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// A node position in meters. `z` is altitude above ground.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance_to(&self, other: &Point3D) -> ModelResult<f64> {
        distance(self, other)
    }

    pub fn elevation_angle_to(&self, other: &Point3D) -> ModelResult<f64> {
        elevation_angle(self, other)
    }
}

/// Euclidean distance between two points.
///
/// Fails with [`ModelError::Domain`] if either point has a non-finite coordinate.
pub fn distance(a: &Point3D, b: &Point3D) -> ModelResult<f64> {
    if !a.is_finite() || !b.is_finite() {
        return Err(ModelError::Domain(format!(
            "non-finite coordinate in distance({a:?}, {b:?})"
        )));
    }
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    Ok((dx * dx + dy * dy + dz * dz).sqrt())
}

/// Elevation angle of `b` as seen from `a`, in radians within `[-π/2, π/2]`.
///
/// Coincident points have no defined angle and yield [`ModelError::Domain`].
pub fn elevation_angle(a: &Point3D, b: &Point3D) -> ModelResult<f64> {
    let d = distance(a, b)?;
    if d == 0.0 {
        return Err(ModelError::Domain(
            "elevation angle undefined for coincident points".into(),
        ));
    }
    // rounding can push |dz|/d a hair past 1
    let ratio = ((b.z - a.z) / d).clamp(-1.0, 1.0);
    Ok(ratio.asin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64, z: f64) -> Point3D {
        Point3D::new(x, y, z)
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = p(1.0, -2.0, 3.5);
        let b = p(-4.0, 7.0, 0.0);
        assert_eq!(distance(&a, &b).unwrap(), distance(&b, &a).unwrap());
        assert_eq!(distance(&a, &a).unwrap(), 0.0);
        assert!((distance(&p(0.0, 0.0, 0.0), &p(3.0, 4.0, 0.0)).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_respects_triangle_inequality() {
        let points = [
            p(0.0, 0.0, 0.0),
            p(10.0, 0.0, 100.0),
            p(-3.0, 8.0, 2.0),
            p(250.0, -40.0, 60.0),
        ];
        for a in &points {
            for b in &points {
                for c in &points {
                    let ab = distance(a, b).unwrap();
                    let bc = distance(b, c).unwrap();
                    let ac = distance(a, c).unwrap();
                    assert!(ac <= ab + bc + 1e-9);
                }
            }
        }
    }

    #[test]
    fn distance_rejects_non_finite_coordinates() {
        let bad = p(f64::NAN, 0.0, 0.0);
        assert!(matches!(distance(&bad, &p(0.0, 0.0, 0.0)), Err(ModelError::Domain(_))));
        let inf = p(0.0, f64::INFINITY, 0.0);
        assert!(matches!(distance(&p(0.0, 0.0, 0.0), &inf), Err(ModelError::Domain(_))));
    }

    #[test]
    fn elevation_angle_covers_vertical_and_horizontal() {
        let ground = p(0.0, 0.0, 0.0);
        assert!((elevation_angle(&ground, &p(0.0, 0.0, 50.0)).unwrap() - FRAC_PI_2).abs() < 1e-12);
        assert!((elevation_angle(&p(0.0, 0.0, 50.0), &ground).unwrap() + FRAC_PI_2).abs() < 1e-12);
        assert_eq!(elevation_angle(&ground, &p(30.0, 40.0, 0.0)).unwrap(), 0.0);

        let diag = elevation_angle(&ground, &p(100.0, 0.0, 100.0)).unwrap();
        assert!((diag - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn elevation_angle_of_coincident_points_is_an_error() {
        let a = p(5.0, 5.0, 5.0);
        assert!(matches!(elevation_angle(&a, &a), Err(ModelError::Domain(_))));
    }
}
