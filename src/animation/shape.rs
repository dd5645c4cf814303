use crate::color::Rgb;
use crate::error::{IntroError, IntroResult};

use super::lighting::Lighting;

/// Maximum number of vertices a shape can hold.
pub const MAX_VERTICES: usize = 64;

/// Local-space vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Screen-space vertex produced by [`Shape::set_orientation`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: Rgb,
}

/// Where and how a shape is projected onto the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub origin_x: f32,
    pub origin_y: f32,
    /// Spin around the vertical axis, in radians
    pub angle: f32,
    /// Vertical skew applied per unit of depth
    pub tilt: f32,
    pub scale: f32,
}

/// A triangle list with its derived render-space copy.
///
/// Vertices are appended a triangle at a time during setup, so the count is
/// always a multiple of three and the transformed buffer always has the same
/// length.
#[derive(Debug, Clone)]
pub struct Shape {
    vertices: Vec<Vertex>,
    transformed: Vec<RenderVertex>,
    depth: f32,
    normal_angle: f32,
}

impl Shape {
    pub fn new(normal_angle: f32) -> Self {
        Self {
            vertices: Vec::with_capacity(MAX_VERTICES),
            transformed: Vec::with_capacity(MAX_VERTICES),
            depth: 0.0,
            normal_angle,
        }
    }

    /// Append one triangle. Fails without modifying the shape when it would
    /// exceed [`MAX_VERTICES`].
    pub fn add_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) -> IntroResult<()> {
        if self.vertices.len() + 3 > MAX_VERTICES {
            return Err(IntroError::ShapeCapacity {
                capacity: MAX_VERTICES,
            });
        }
        self.vertices.extend_from_slice(&[a, b, c]);
        self.transformed
            .extend_from_slice(&[RenderVertex::default(); 3]);
        Ok(())
    }

    /// Append a quad as two triangles (`a b d`, `b c d`).
    pub fn add_quad(&mut self, a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> IntroResult<()> {
        if self.vertices.len() + 6 > MAX_VERTICES {
            return Err(IntroError::ShapeCapacity {
                capacity: MAX_VERTICES,
            });
        }
        self.add_triangle(a, b, d)?;
        self.add_triangle(b, c, d)
    }

    /// Recompute every render-space vertex, the shape depth and its shade.
    pub fn set_orientation(&mut self, o: &Orientation, lighting: &Lighting) {
        let color = lighting.shade(self.normal_angle + o.angle);
        let mut depth = f32::MAX;

        for (v, out) in self.vertices.iter().zip(self.transformed.iter_mut()) {
            let vangle = v.z.atan2(v.x);
            let vdistance = v.x.hypot(v.z);
            let (sin, cos) = (vangle + o.angle).sin_cos();
            let depth_proxy = sin * vdistance;

            *out = RenderVertex {
                x: o.origin_x + cos * vdistance * o.scale,
                y: o.origin_y + (v.y + depth_proxy * o.tilt) * o.scale,
                z: 0.0,
                color,
            };
            depth = depth.min(depth_proxy);
        }

        self.depth = if self.vertices.is_empty() { 0.0 } else { depth };
    }

    #[cfg(test)]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn transformed(&self) -> &[RenderVertex] {
        &self.transformed
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Primitive count handed to the triangle-list renderer. One past the
    /// vertex count; the trailing partial triangle is never drawn.
    pub fn draw_count(&self) -> usize {
        self.vertex_count() + 1
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }
}
