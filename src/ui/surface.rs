use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::animation::shape::RenderVertex;
use crate::color::Rgb;

/// Color and opacity applied to a bitmap when it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint {
    pub color: Rgb,
    pub alpha: f32,
}

impl Tint {
    pub fn new(color: Rgb, alpha: f32) -> Self {
        Self { color, alpha }
    }
}

// ============================================================================
// Bitmap
// ============================================================================

/// Single-channel coverage mask, tinted when drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    coverage: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.coverage[y * self.width + x]
        } else {
            0
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.coverage[y * self.width + x] = value;
        }
    }

    /// Number of pixels with any coverage
    pub fn covered(&self) -> usize {
        self.coverage.iter().filter(|&&c| c > 0).count()
    }

    /// Uncovered pixels within `thickness` pixels (Chebyshev distance) of a
    /// covered one.
    pub fn ring(&self, thickness: usize) -> Bitmap {
        let mut out = Bitmap::new(self.width, self.height);
        let t = thickness as isize;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) > 0 {
                    continue;
                }
                let near = (-t..=t).any(|dy| {
                    (-t..=t).any(|dx| {
                        let (nx, ny) = (x as isize + dx, y as isize + dy);
                        nx >= 0 && ny >= 0 && self.get(nx as usize, ny as usize) > 0
                    })
                });
                if near {
                    out.set(x, y, 255);
                }
            }
        }
        out
    }
}

// ============================================================================
// Rasterization
// ============================================================================

/// Call `plot` for every pixel whose centre lies inside the triangle,
/// clipped to `width` x `height`.
pub fn scan_triangle(
    points: [(f32, f32); 3],
    width: usize,
    height: usize,
    mut plot: impl FnMut(usize, usize),
) {
    let min_y = points.iter().map(|p| p.1).fold(f32::MAX, f32::min);
    let max_y = points.iter().map(|p| p.1).fold(f32::MIN, f32::max);
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }

    let first_row = min_y.floor().max(0.0) as usize;
    let last_row = max_y.ceil().min(height as f32).max(0.0) as usize;

    let mut crossings = [0.0f32; 3];
    for y in first_row..last_row {
        let yf = y as f32 + 0.5;

        let mut n = 0;
        for i in 0..3 {
            let (x1, y1) = points[i];
            let (x2, y2) = points[(i + 1) % 3];
            if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                crossings[n] = x1 + (yf - y1) / (y2 - y1) * (x2 - x1);
                n += 1;
            }
        }
        if n < 2 {
            continue;
        }

        let left = crossings[0].min(crossings[1]);
        let right = crossings[0].max(crossings[1]);
        let start = (left - 0.5).ceil().max(0.0) as usize;
        let end = (right - 0.5).ceil().min(width as f32).max(0.0) as usize;
        for x in start..end {
            plot(x, y);
        }
    }
}

// ============================================================================
// Surface
// ============================================================================

/// RGB framebuffer the scene is drawn into before it reaches the terminal.
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    /// Match a new frame size. Contents are undefined until the next clear.
    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![Rgb::BLACK; width * height];
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, mixing `color` over what is there with `alpha`.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        let x0 = x.max(0.0) as usize;
        let y0 = y.max(0.0) as usize;
        let x1 = (x + w).min(self.width as f32).max(0.0) as usize;
        let y1 = (y + h).min(self.height as f32).max(0.0) as usize;
        for py in y0..y1 {
            let row = py * self.width;
            for px in x0..x1 {
                let dst = &mut self.pixels[row + px];
                *dst = dst.blend(color, alpha);
            }
        }
    }

    /// Draw `count` vertices as a triangle list. Only complete triangles are
    /// drawn, each in the color of its first vertex.
    pub fn draw_triangle_list(&mut self, vertices: &[RenderVertex], count: usize) {
        let count = count.min(vertices.len());
        let (width, height) = (self.width, self.height);
        let pixels = &mut self.pixels;

        for tri in vertices[..count].chunks_exact(3) {
            let color = tri[0].color;
            let points = [(tri[0].x, tri[0].y), (tri[1].x, tri[1].y), (tri[2].x, tri[2].y)];
            scan_triangle(points, width, height, |x, y| pixels[y * width + x] = color);
        }
    }

    /// Draw `bitmap` stretched over the square at (`x`, `y`) with side
    /// `size`, nearest-neighbour sampled.
    pub fn draw_scaled_bitmap(&mut self, bitmap: &Bitmap, tint: Tint, x: f32, y: f32, size: f32) {
        if tint.alpha <= 0.0 || size <= 0.0 || bitmap.width() == 0 || bitmap.height() == 0 {
            return;
        }

        let x0 = x.max(0.0) as usize;
        let y0 = y.max(0.0) as usize;
        let x1 = (x + size).min(self.width as f32).max(0.0) as usize;
        let y1 = (y + size).min(self.height as f32).max(0.0) as usize;

        for py in y0..y1 {
            let v = (py as f32 + 0.5 - y) / size;
            let sy = (v * bitmap.height() as f32) as usize;
            for px in x0..x1 {
                let u = (px as f32 + 0.5 - x) / size;
                let sx = (u * bitmap.width() as f32) as usize;
                let coverage = bitmap.get(sx, sy);
                if coverage == 0 {
                    continue;
                }
                let alpha = tint.alpha * coverage as f32 / 255.0;
                let dst = &mut self.pixels[py * self.width + px];
                *dst = dst.blend(tint.color, alpha);
            }
        }
    }
}

// ============================================================================
// Terminal view
// ============================================================================

/// Shows a surface with one `▀` per cell: the upper pixel as foreground,
/// the lower one as background.
pub struct HalfBlocks<'a> {
    surface: &'a Surface,
}

impl<'a> HalfBlocks<'a> {
    pub fn new(surface: &'a Surface) -> Self {
        Self { surface }
    }
}

impl Widget for HalfBlocks<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as usize;
                let top = self.surface.pixel(x, row as usize * 2);
                let bottom = self.surface.pixel(x, row as usize * 2 + 1);
                let (Some(top), Some(bottom)) = (top, bottom) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_char('▀').set_fg(top.into()).set_bg(bottom.into());
                }
            }
        }
    }
}
