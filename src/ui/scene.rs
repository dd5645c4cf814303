use crate::animation::logo::LOGO_EXTENT;
use crate::animation::AnimationState;
use crate::config::ThemeConfig;

use super::assets::Assets;
use super::surface::{Surface, Tint};

/// Draw one frame of the intro. Reads the animation state, never changes it.
pub fn render(state: &AnimationState, assets: &Assets, theme: &ThemeConfig, surface: &mut Surface) {
    surface.clear(theme.background);

    for shape in state.draw_order() {
        surface.draw_triangle_list(shape.transformed(), shape.draw_count());
    }

    let o = state.orientation();
    let extent = LOGO_EXTENT * o.scale;
    let (x, y, size) = (o.origin_x - extent, o.origin_y - extent, extent * 2.0);
    surface.draw_scaled_bitmap(
        &assets.outline,
        Tint::new(theme.outline, state.logo_fade),
        x,
        y,
        size,
    );
    surface.draw_scaled_bitmap(
        &assets.logo,
        Tint::new(theme.flash, state.overlay_fade),
        x,
        y,
        size,
    );

    let (w, h) = (surface.width() as f32, surface.height() as f32);
    surface.fill_rect(0.0, 0.0, w, h, theme.fade, state.screen_fade);
}
