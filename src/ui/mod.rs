pub mod assets;
pub mod scene;
pub mod surface;
pub mod theme;

use ratatui::Frame;

use crate::app::App;
use surface::HalfBlocks;

/// Top-level draw function — renders the intro into the whole frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.surface
        .resize(area.width as usize, area.height as usize * 2);
    scene::render(&app.state, &app.assets, &app.config.theme, &mut app.surface);
    f.render_widget(HalfBlocks::new(&app.surface), area);
}
