use std::f32::consts::PI;

use tracing::{debug, info, trace};

use crate::audio::Sample;
use crate::error::IntroResult;
use crate::input::Key;

use super::depth::sort_back_to_front;
use super::lighting::Lighting;
use super::logo::build_faces;
use super::punch::Punch;
use super::shape::{Orientation, Shape};
use super::{Display, Host, Signal};

/// Screen fade change per tick while fading in or out
pub const SCREEN_FADE_STEP: f32 = 0.015;
/// Tick budget the spin decelerates over
pub const SPIN_TICKS: i32 = 60;
/// The spin ends this many ticks past its budget
pub const SETTLE_TICK: i32 = -8;
/// Countdown value while no spin is running
pub const IDLE_TICK: i32 = -1000;
/// Resting angle of the logo
pub const ANGLE_TARGET: f32 = 2.25 * PI;
/// Resting tilt of the logo
pub const TILT_TARGET: f32 = 0.5;
pub const NUDGE_ANGLE: f32 = PI / 16.0;
pub const NUDGE_TILT: f32 = 0.1;
/// Opacity the flash overlay starts from
pub const FLASH_OPACITY: f32 = 0.75;

/// Phases of the intro, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FadeIn,
    Wait,
    Spin,
    FadeOutline,
    FadeFlash,
    Done,
    FadeOut,
}

/// Everything the intro mutates, owned in one place.
#[derive(Debug, Clone)]
pub struct AnimationState {
    pub phase: Phase,
    pub angle: f32,
    pub tilt: f32,
    pub angle_motion: Punch,
    pub tilt_motion: Punch,
    /// Spin countdown; see [`SPIN_TICKS`] and [`SETTLE_TICK`]
    pub tick: i32,
    /// Opacity of the full-screen fade, 1 = fully obscured
    pub screen_fade: f32,
    pub logo_fade: f32,
    pub logo_fade_velocity: f32,
    /// Opacity of the flash overlay
    pub overlay_fade: f32,
    shapes: [Shape; 3],
    order: [usize; 3],
    lighting: Lighting,
    display: Display,
}

impl AnimationState {
    pub fn new(display: Display, lighting: Lighting) -> IntroResult<Self> {
        let mut state = Self {
            phase: Phase::FadeIn,
            angle: 0.0,
            tilt: 0.0,
            angle_motion: Punch::default(),
            tilt_motion: Punch::default(),
            tick: IDLE_TICK,
            screen_fade: 1.0,
            logo_fade: 0.0,
            logo_fade_velocity: 0.0,
            overlay_fade: 0.0,
            shapes: build_faces()?,
            order: [0, 1, 2],
            lighting,
            display,
        };
        state.update_transforms();
        Ok(state)
    }

    /// Advance the intro by one tick.
    pub fn logic(&mut self, host: &mut Host<'_>) -> Signal {
        if host.display != self.display {
            self.display = host.display;
            self.update_transforms();
        }

        match self.phase {
            Phase::FadeIn => self.fade_in(),
            Phase::Wait => self.wait(host),
            Phase::Spin => self.spin(host),
            Phase::FadeOutline => self.fade_outline(),
            Phase::FadeFlash => self.fade_flash(host),
            Phase::Done => self.done(host),
            Phase::FadeOut => return self.fade_out(),
        }
        Signal::Continue
    }

    fn fade_in(&mut self) {
        self.screen_fade -= SCREEN_FADE_STEP;
        if self.screen_fade <= 0.0 {
            self.screen_fade = 0.0;
            self.set_phase(Phase::Wait);
        }
    }

    fn wait(&mut self, host: &mut Host<'_>) {
        let mut nudged = false;
        if host.keys.consume(Key::Left) {
            self.angle -= NUDGE_ANGLE;
            nudged = true;
        }
        if host.keys.consume(Key::Right) {
            self.angle += NUDGE_ANGLE;
            nudged = true;
        }
        if host.keys.consume(Key::Up) {
            self.tilt -= NUDGE_TILT;
            nudged = true;
        }
        if host.keys.consume(Key::Down) {
            self.tilt += NUDGE_TILT;
            nudged = true;
        }
        if nudged {
            debug!(angle = self.angle, tilt = self.tilt, "nudge");
            self.update_transforms();
        }

        if host.keys.consume(Key::Trigger) {
            self.start_spin(host);
        }
    }

    fn start_spin(&mut self, host: &mut Host<'_>) {
        host.audio.play(Sample::Bump);

        self.angle_motion = Punch::solve(ANGLE_TARGET - self.angle, SPIN_TICKS as u32);
        self.tilt_motion = Punch::solve(TILT_TARGET - self.tilt, SPIN_TICKS as u32);
        self.logo_fade = 0.0;
        self.logo_fade_velocity = 1.0 / SPIN_TICKS as f32;
        self.tick = SPIN_TICKS;

        debug!(
            angle = ?self.angle_motion,
            tilt = ?self.tilt_motion,
            "spin started"
        );
        self.set_phase(Phase::Spin);
    }

    fn spin(&mut self, host: &mut Host<'_>) {
        self.tilt_motion.step(&mut self.tilt);
        self.angle_motion.step(&mut self.angle);
        self.tick -= 1;
        trace!(tick = self.tick, angle = self.angle, tilt = self.tilt, "spin");

        if self.tick == 0 {
            // Budget spent: settle in place
            self.angle_motion.stop();
            self.tilt_motion.stop();
        }

        if self.tick == SETTLE_TICK {
            host.audio.play(Sample::Click);
            self.angle = ANGLE_TARGET;
            self.tilt = TILT_TARGET;
            self.set_phase(Phase::FadeOutline);
        }
        self.update_transforms();
    }

    fn fade_outline(&mut self) {
        self.logo_fade += self.logo_fade_velocity;
        if self.logo_fade >= 1.0 {
            self.logo_fade = 1.0;
            self.overlay_fade = FLASH_OPACITY;
            self.set_phase(Phase::FadeFlash);
        }
    }

    fn fade_flash(&mut self, host: &mut Host<'_>) {
        self.overlay_fade -= self.logo_fade_velocity;
        if self.overlay_fade <= 0.0 {
            self.overlay_fade = 0.0;
            host.keys.clear_all();
            self.set_phase(Phase::Done);
        }
    }

    fn done(&mut self, host: &mut Host<'_>) {
        if host.keys.consume(Key::Replay) {
            self.reset();
            self.set_phase(Phase::FadeIn);
        } else if host.keys.any_pressed() {
            host.keys.clear_all();
            self.set_phase(Phase::FadeOut);
        }
    }

    fn fade_out(&mut self) -> Signal {
        self.screen_fade += SCREEN_FADE_STEP;
        if self.screen_fade >= 1.0 {
            self.screen_fade = 1.0;
            return Signal::Exit;
        }
        Signal::Continue
    }

    fn set_phase(&mut self, next: Phase) {
        info!(from = ?self.phase, to = ?next, "phase change");
        self.phase = next;
    }

    /// Put the logo back where it started, fully obscured.
    fn reset(&mut self) {
        self.angle = 0.0;
        self.tilt = 0.0;
        self.angle_motion = Punch::default();
        self.tilt_motion = Punch::default();
        self.tick = IDLE_TICK;
        self.screen_fade = 1.0;
        self.logo_fade = 0.0;
        self.logo_fade_velocity = 0.0;
        self.overlay_fade = 0.0;
        self.update_transforms();
    }

    /// Reproject every face for the current angle, tilt and display, then
    /// re-sort them back to front.
    fn update_transforms(&mut self) {
        let orientation = self.orientation();
        for shape in &mut self.shapes {
            shape.set_orientation(&orientation, &self.lighting);
        }
        sort_back_to_front(&self.shapes, &mut self.order);
    }

    /// Projection for the current frame, centred on the display.
    pub fn orientation(&self) -> Orientation {
        let (origin_x, origin_y) = self.display.center();
        Orientation {
            origin_x,
            origin_y,
            angle: self.angle,
            tilt: self.tilt,
            scale: self.display.logo_scale(),
        }
    }

    #[cfg(test)]
    pub fn shapes(&self) -> &[Shape; 3] {
        &self.shapes
    }

    /// Shape indices, farthest first.
    #[cfg(test)]
    pub fn order(&self) -> [usize; 3] {
        self.order
    }

    /// Shapes in the order they should be drawn.
    pub fn draw_order(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.order.iter().map(move |&i| &self.shapes[i])
    }

    #[cfg(test)]
    pub fn display(&self) -> Display {
        self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Recorder;
    use crate::color::Rgb;
    use crate::input::KeyState;

    struct Harness {
        state: AnimationState,
        keys: KeyState,
        audio: Recorder,
        display: Display,
    }

    impl Harness {
        fn new() -> Self {
            let display = Display::new(640.0, 480.0);
            let lighting = Lighting::new(Rgb::new(208, 64, 32), 0.0);
            Self {
                state: AnimationState::new(display, lighting).unwrap(),
                keys: KeyState::default(),
                audio: Recorder::default(),
                display,
            }
        }

        fn tick(&mut self) -> Signal {
            let mut host = Host {
                keys: &mut self.keys,
                audio: &mut self.audio,
                display: self.display,
            };
            self.state.logic(&mut host)
        }

        /// Tick until the phase changes, returning the number of ticks taken.
        fn run_phase(&mut self) -> usize {
            let start = self.state.phase;
            for n in 1..=1000 {
                self.tick();
                if self.state.phase != start {
                    return n;
                }
            }
            panic!("stuck in {start:?}");
        }

        fn at_done() -> Self {
            let mut h = Self::new();
            h.run_phase();
            h.keys.press(Key::Trigger);
            while h.state.phase != Phase::Done {
                h.run_phase();
            }
            h
        }
    }

    #[test]
    fn starts_obscured() {
        let h = Harness::new();
        assert_eq!(h.state.phase, Phase::FadeIn);
        assert_eq!(h.state.screen_fade, 1.0);
        assert!(h.state.tick < SETTLE_TICK);
    }

    #[test]
    fn fade_in_takes_67_ticks() {
        let mut h = Harness::new();
        for _ in 0..66 {
            h.tick();
        }
        assert_eq!(h.state.phase, Phase::FadeIn);
        h.tick();
        assert_eq!(h.state.phase, Phase::Wait);
        assert_eq!(h.state.screen_fade, 0.0);
    }

    #[test]
    fn angle_frozen_outside_spin() {
        let mut h = Harness::new();
        for _ in 0..200 {
            let (angle, tilt) = (h.state.angle, h.state.tilt);
            h.tick();
            assert_eq!((h.state.angle, h.state.tilt), (angle, tilt));
        }
        assert_eq!(h.state.phase, Phase::Wait);
    }

    #[test]
    fn wait_nudges_are_consumed() {
        let mut h = Harness::new();
        h.run_phase();
        h.keys.press(Key::Right);
        h.keys.press(Key::Down);
        h.tick();
        assert!((h.state.angle - NUDGE_ANGLE).abs() < 1e-6);
        assert!((h.state.tilt - NUDGE_TILT).abs() < 1e-6);
        assert!(!h.keys.is_pressed(Key::Right));
        assert_eq!(h.state.phase, Phase::Wait);

        h.keys.press(Key::Left);
        h.keys.press(Key::Up);
        h.tick();
        assert!(h.state.angle.abs() < 1e-6);
        assert!(h.state.tilt.abs() < 1e-6);
    }

    #[test]
    fn nudges_ignored_while_fading_in() {
        let mut h = Harness::new();
        h.keys.press(Key::Left);
        h.tick();
        assert_eq!(h.state.angle, 0.0);
        assert!(h.keys.is_pressed(Key::Left));
    }

    #[test]
    fn spin_lands_exactly_after_68_ticks() {
        let mut h = Harness::new();
        h.run_phase();
        h.keys.press(Key::Trigger);
        h.tick();
        assert_eq!(h.state.phase, Phase::Spin);
        assert_eq!(h.audio.played, vec![Sample::Bump]);
        assert_eq!(h.state.tick, SPIN_TICKS);
        assert_eq!(h.state.logo_fade, 0.0);

        for _ in 0..67 {
            h.tick();
            assert_eq!(h.state.phase, Phase::Spin);
        }
        h.tick();
        assert_eq!(h.state.phase, Phase::FadeOutline);
        assert_eq!(h.state.angle, 2.25 * PI);
        assert_eq!(h.state.tilt, 0.5);
        assert_eq!(h.audio.played, vec![Sample::Bump, Sample::Click]);
    }

    #[test]
    fn settle_holds_the_resting_pose() {
        let mut h = Harness::new();
        h.run_phase();
        h.keys.press(Key::Trigger);
        h.tick();
        for _ in 0..SPIN_TICKS {
            h.tick();
        }
        let landed = (h.state.angle, h.state.tilt);
        assert_eq!(h.state.angle_motion, Punch::default());
        assert_eq!(h.state.tilt_motion, Punch::default());

        while h.state.tick > SETTLE_TICK + 1 {
            h.tick();
            assert_eq!(h.state.phase, Phase::Spin);
            assert_eq!((h.state.angle, h.state.tilt), landed);
        }
        assert!((h.state.angle - ANGLE_TARGET).abs() < 1e-3);
        assert!((h.state.tilt - TILT_TARGET).abs() < 1e-3);

        h.tick();
        assert_eq!(h.state.phase, Phase::FadeOutline);
    }

    #[test]
    fn spin_reaches_target_within_budget() {
        let mut h = Harness::new();
        h.run_phase();
        h.keys.press(Key::Trigger);
        h.tick();
        for _ in 0..SPIN_TICKS {
            h.tick();
        }
        assert_eq!(h.state.tick, 0);
        assert!((h.state.angle - ANGLE_TARGET).abs() < 1e-3);
        assert!((h.state.tilt - TILT_TARGET).abs() < 1e-3);
    }

    #[test]
    fn spin_reorders_faces() {
        let mut h = Harness::new();
        h.run_phase();
        h.keys.press(Key::Trigger);
        h.tick();
        let mut seen = std::collections::HashSet::new();
        while h.state.phase == Phase::Spin {
            h.tick();
            seen.insert(h.state.order());
            let depths: Vec<f32> = h.state.draw_order().map(Shape::depth).collect();
            assert!(depths.windows(2).all(|w| w[0] <= w[1]));
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn reveal_runs_outline_then_flash() {
        let mut h = Harness::new();
        h.run_phase();
        h.keys.press(Key::Trigger);
        while h.state.phase != Phase::FadeOutline {
            h.run_phase();
        }

        h.run_phase();
        assert_eq!(h.state.phase, Phase::FadeFlash);
        assert_eq!(h.state.logo_fade, 1.0);
        assert_eq!(h.state.overlay_fade, FLASH_OPACITY);

        h.keys.press(Key::Other);
        h.run_phase();
        assert_eq!(h.state.phase, Phase::Done);
        assert_eq!(h.state.overlay_fade, 0.0);
        assert!(!h.keys.any_pressed());
    }

    #[test]
    fn done_waits_for_input() {
        let mut h = Harness::at_done();
        for _ in 0..100 {
            assert_eq!(h.tick(), Signal::Continue);
        }
        assert_eq!(h.state.phase, Phase::Done);
    }

    #[test]
    fn replay_runs_the_intro_again() {
        let mut h = Harness::at_done();
        h.keys.press(Key::Replay);
        h.tick();
        assert_eq!(h.state.phase, Phase::FadeIn);
        assert_eq!(h.state.screen_fade, 1.0);
        assert_eq!(h.state.angle, 0.0);
        assert_eq!(h.state.tilt, 0.0);

        h.run_phase();
        assert_eq!(h.state.phase, Phase::Wait);
        assert_eq!(h.state.screen_fade, 0.0);
    }

    #[test]
    fn other_key_fades_out_and_exits() {
        let mut h = Harness::at_done();
        h.keys.press(Key::Trigger);
        h.tick();
        assert_eq!(h.state.phase, Phase::FadeOut);
        assert!(!h.keys.any_pressed());

        let mut ticks = 0;
        loop {
            ticks += 1;
            if h.tick() == Signal::Exit {
                break;
            }
            assert!(ticks < 1000);
        }
        assert_eq!(h.state.screen_fade, 1.0);
        assert_eq!(ticks, 67);
    }

    #[test]
    fn resize_recentres_logo() {
        let mut h = Harness::new();
        let before = h.state.shapes()[0].transformed()[0];
        h.display = Display::new(1280.0, 960.0);
        h.tick();
        let after = h.state.shapes()[0].transformed()[0];
        assert_ne!(before, after);
        assert_eq!(h.state.display(), h.display);
        assert_eq!(h.state.orientation().origin_x, 640.0);
    }
}
