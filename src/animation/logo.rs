//! Geometry of the three logo faces.
//!
//! Each face is a "T" made of two bars: a wide crossbar across the top and a
//! narrow stem below it. The faces sit on three sides of a 6x6x6 cube.

use std::f32::consts::FRAC_PI_2;

use crate::error::IntroResult;

use super::shape::{Shape, Vertex};

const fn v(x: f32, y: f32, z: f32) -> Vertex {
    Vertex::new(x, y, z)
}

/// Crossbar then stem, each as a quad in (top-left, top-right, bottom-right,
/// bottom-left) order.
type Face = [[Vertex; 4]; 2];

const FRONT: Face = [
    [v(-3.0, -3.0, -3.0), v(3.0, -3.0, -3.0), v(3.0, -1.0, -3.0), v(-3.0, -1.0, -3.0)],
    [v(-1.0, -1.0, -3.0), v(1.0, -1.0, -3.0), v(1.0, 3.0, -3.0), v(-1.0, 3.0, -3.0)],
];

const RIGHT: Face = [
    [v(3.0, -3.0, -3.0), v(3.0, -3.0, 3.0), v(3.0, -1.0, 3.0), v(3.0, -1.0, -3.0)],
    [v(3.0, -1.0, -1.0), v(3.0, -1.0, 1.0), v(3.0, 3.0, 1.0), v(3.0, 3.0, -1.0)],
];

const BACK: Face = [
    [v(-3.0, -3.0, 3.0), v(3.0, -3.0, 3.0), v(3.0, -1.0, 3.0), v(-3.0, -1.0, 3.0)],
    [v(-1.0, -1.0, 3.0), v(1.0, -1.0, 3.0), v(1.0, 3.0, 3.0), v(-1.0, 3.0, 3.0)],
];

/// Outward normal of each face as a horizontal angle, in the same polar
/// convention the projection uses (`atan2(z, x)`).
const FACES: [(Face, f32); 3] = [(FRONT, -FRAC_PI_2), (RIGHT, 0.0), (BACK, FRAC_PI_2)];

/// Half the side of the square (in logo units) that encloses the logo in
/// its resting orientation.
pub const LOGO_EXTENT: f32 = 5.5;

/// Build the three faces: front, right, back.
pub fn build_faces() -> IntroResult<[Shape; 3]> {
    let [front, right, back] = FACES;
    Ok([build(front)?, build(right)?, build(back)?])
}

fn build((face, normal): (Face, f32)) -> IntroResult<Shape> {
    let mut shape = Shape::new(normal);
    for [a, b, c, d] in face {
        shape.add_quad(a, b, c, d)?;
    }
    Ok(shape)
}
