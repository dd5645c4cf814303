use crate::color::Rgb;

// ─── Default Palette ─────────────────────────────────────────────────────

/// Backdrop behind the logo
pub const BACKGROUND: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Base color of the logo faces before shading
pub const LOGO: Rgb = Rgb::new(0xd0, 0x40, 0x20);

/// Ring that fades in around the logo once it stops
pub const OUTLINE: Rgb = Rgb::new(0x20, 0x20, 0x20);

/// Flash laid over the logo after the outline
pub const FLASH: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Full-screen fade color
pub const FADE: Rgb = Rgb::new(0x00, 0x00, 0x00);
