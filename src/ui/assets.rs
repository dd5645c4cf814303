use tracing::info;

use crate::animation::lighting::{Lighting, LIGHT_ANGLE};
use crate::animation::logo::{build_faces, LOGO_EXTENT};
use crate::animation::shape::Orientation;
use crate::animation::timeline::{ANGLE_TARGET, TILT_TARGET};
use crate::color::Rgb;
use crate::error::IntroResult;

use super::surface::{scan_triangle, Bitmap};

/// Side of the baked bitmaps in pixels
pub const BITMAP_SIZE: usize = 96;
/// Thickness of the outline ring in bitmap pixels
pub const OUTLINE_THICKNESS: usize = 3;

/// Overlay artwork, baked once at startup from the logo at rest.
#[derive(Debug, Clone)]
pub struct Assets {
    /// Solid silhouette of the resting logo
    pub logo: Bitmap,
    /// Ring hugging the silhouette
    pub outline: Bitmap,
}

impl Assets {
    /// Both bitmaps cover `±LOGO_EXTENT` logo units around the logo origin.
    pub fn bake() -> IntroResult<Self> {
        let half = BITMAP_SIZE as f32 / 2.0;
        let orientation = Orientation {
            origin_x: half,
            origin_y: half,
            angle: ANGLE_TARGET,
            tilt: TILT_TARGET,
            scale: half / LOGO_EXTENT,
        };
        let lighting = Lighting::new(Rgb::WHITE, LIGHT_ANGLE);

        let mut logo = Bitmap::new(BITMAP_SIZE, BITMAP_SIZE);
        for mut face in build_faces()? {
            face.set_orientation(&orientation, &lighting);
            for tri in face.transformed().chunks_exact(3) {
                let points = [(tri[0].x, tri[0].y), (tri[1].x, tri[1].y), (tri[2].x, tri[2].y)];
                scan_triangle(points, BITMAP_SIZE, BITMAP_SIZE, |x, y| logo.set(x, y, 255));
            }
        }
        let outline = logo.ring(OUTLINE_THICKNESS);

        info!(
            logo = logo.covered(),
            outline = outline.covered(),
            "baked logo bitmaps"
        );
        Ok(Self { logo, outline })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bakes_silhouette_and_outline() {
        let assets = Assets::bake().unwrap();
        assert_eq!(assets.logo.width(), BITMAP_SIZE);
        assert!(assets.logo.covered() > 0);
        assert!(assets.outline.covered() > 0);

        for y in 0..BITMAP_SIZE {
            for x in 0..BITMAP_SIZE {
                assert!(assets.logo.get(x, y) == 0 || assets.outline.get(x, y) == 0);
            }
        }
    }

    #[test]
    fn silhouette_fits_inside_bitmap() {
        let assets = Assets::bake().unwrap();
        for i in 0..BITMAP_SIZE {
            assert_eq!(assets.logo.get(i, 0), 0);
            assert_eq!(assets.logo.get(i, BITMAP_SIZE - 1), 0);
            assert_eq!(assets.logo.get(0, i), 0);
            assert_eq!(assets.logo.get(BITMAP_SIZE - 1, i), 0);
        }
    }
}
