use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::animation::lighting::{Lighting, LIGHT_ANGLE};
use crate::animation::{AnimationState, Display, Host, Signal};
use crate::audio::SoundSink;
use crate::config::Config;
use crate::error::IntroResult;
use crate::event::Event;
use crate::input::{KeyBindings, KeyState};
use crate::ui::assets::Assets;
use crate::ui::surface::Surface;

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub should_quit: bool,
    pub config: Config,

    // Animation
    pub state: AnimationState,
    pub display: Display,

    // Input
    pub keys: KeyState,
    pub bindings: KeyBindings,

    // Output
    pub audio: Box<dyn SoundSink>,
    pub assets: Assets,
    pub surface: Surface,
}

impl App {
    pub fn new(config: Config, display: Display, audio: Box<dyn SoundSink>) -> IntroResult<Self> {
        let lighting = Lighting::new(config.theme.logo, LIGHT_ANGLE);
        let state = AnimationState::new(display, lighting)?;
        let bindings = KeyBindings::from_config(&config.keys)?;
        let assets = Assets::bake()?;
        let surface = Surface::new(display.width as usize, display.height as usize);

        Ok(Self {
            should_quit: false,
            config,
            state,
            display,
            keys: KeyState::default(),
            bindings,
            audio,
            assets,
            surface,
        })
    }

    /// Dispatch one event from the event loop
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Tick => self.tick(),
            Event::Resize(columns, rows) => {
                self.display = Display::from_terminal(columns, rows);
                debug!(display = ?self.display, "resized");
            }
        }
    }

    /// Latch a key press for the next logic step
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        let logical = self.bindings.map(key.code);
        self.keys.press(logical);
    }

    /// Run one logic step
    pub fn tick(&mut self) {
        let mut host = Host {
            keys: &mut self.keys,
            audio: &mut *self.audio,
            display: self.display,
        };
        if self.state.logic(&mut host) == Signal::Exit {
            info!("intro finished");
            self.should_quit = true;
        }
    }
}
