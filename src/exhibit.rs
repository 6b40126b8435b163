use macroquad::prelude::*;

use crate::dial::Dial;
use crate::instrument::{Instrument, pitch_for_orientation};
use crate::scene::{SLIDER_MAX_X, SLIDER_MIN_X, SceneLayout};

/// A play button press only registers once the counter has climbed past
/// this many update ticks (about half a second at 60 Hz).
pub const COOLDOWN_ARMED: u32 = 30;

/// Which widget the pointer is currently holding, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressState {
    None,
    DialRight,
    DialLeft,
    PlayRadio,
    PlaySound,
    Slider,
}

/// What the game loop should do after a pointer release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseAction {
    None,
    Play,
    InstrumentChanged(Instrument),
}

/// All mutable exhibit state, owned by the loop thread and handed by
/// reference to the dispatcher and the renderer.
pub struct ExhibitState {
    layout: SceneLayout,
    press: PressState,
    mouse_held: bool,
    dial_instrument: Dial,
    dial_pitch: Dial,
    slider_x: f32,
    instrument: Instrument,
    cooldown: u32,
    radio_button_dimmed: bool,
    sound_button_dimmed: bool,
    exit_requested: bool,
}

impl ExhibitState {
    pub fn new(layout: SceneLayout) -> Self {
        let dial_instrument = Dial::new(layout.dial_instrument_pivot);
        let dial_pitch = Dial::new(layout.dial_pitch_pivot);
        Self {
            layout,
            press: PressState::None,
            mouse_held: false,
            dial_instrument,
            dial_pitch,
            slider_x: 568.0,
            instrument: Instrument::Guitar,
            // Starts armed so the very first press registers.
            cooldown: COOLDOWN_ARMED + 1,
            radio_button_dimmed: false,
            sound_button_dimmed: false,
            exit_requested: false,
        }
    }

    /// Hit-tests the pointer against the interactive widgets in fixed
    /// priority order; the first match wins. Play buttons only register
    /// while the shared cooldown counter is armed.
    pub fn pointer_down(&mut self, point: Vec2) {
        self.mouse_held = true;
        if self.layout.slider_track.contains(point) {
            self.press = PressState::Slider;
            return;
        }
        if self
            .layout
            .dial_bounds(self.dial_instrument.pivot())
            .contains(point)
        {
            self.press = PressState::DialRight;
            return;
        }
        if self
            .layout
            .dial_bounds(self.dial_pitch.pivot())
            .contains(point)
        {
            self.press = PressState::DialLeft;
            return;
        }
        if self.layout.play_radio.contains(point) {
            if self.cooldown > COOLDOWN_ARMED {
                self.press = PressState::PlayRadio;
                self.radio_button_dimmed = true;
                self.cooldown = 0;
            }
            return;
        }
        if self.layout.play_sound.contains(point) && self.cooldown > COOLDOWN_ARMED {
            self.press = PressState::PlaySound;
            self.sound_button_dimmed = true;
            self.cooldown = 0;
        }
    }

    /// Drags the grabbed widget. Dials re-snap from the pointer angle; the
    /// slider follows the pointer x within its travel.
    pub fn pointer_move(&mut self, point: Vec2) {
        if !self.mouse_held {
            return;
        }
        match self.press {
            PressState::Slider => {
                self.slider_x = point.x.clamp(SLIDER_MIN_X, SLIDER_MAX_X);
            }
            PressState::DialRight => self.dial_instrument.track(point),
            PressState::DialLeft => self.dial_pitch.track(point),
            PressState::None | PressState::PlayRadio | PressState::PlaySound => {}
        }
    }

    /// Releases the grabbed widget and reports what, if anything, the audio
    /// player should do. The press state always returns to None.
    pub fn pointer_up(&mut self) -> ReleaseAction {
        self.mouse_held = false;
        let action = match self.press {
            PressState::PlayRadio => ReleaseAction::Play,
            PressState::DialRight => {
                self.instrument = Instrument::from_orientation(self.dial_instrument.orientation());
                ReleaseAction::InstrumentChanged(self.instrument)
            }
            _ => ReleaseAction::None,
        };
        self.press = PressState::None;
        action
    }

    /// One fixed-timestep tick: advance the cooldown, and once it passes the
    /// armed threshold restore both play buttons to their default tint.
    pub fn update_tick(&mut self) {
        if self.cooldown <= COOLDOWN_ARMED {
            self.cooldown += 1;
        } else {
            self.radio_button_dimmed = false;
            self.sound_button_dimmed = false;
        }
    }

    /// Pitch multiplier demanded by the pitch dial this tick. None at the
    /// 0/180 detents: the voice holds its previous pitch there.
    pub fn pitch_update(&self) -> Option<f32> {
        pitch_for_orientation(self.dial_pitch.orientation())
    }

    pub fn set_instrument(&mut self, instrument: Instrument) {
        self.instrument = instrument;
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn press(&self) -> PressState {
        self.press
    }

    pub fn slider_x(&self) -> f32 {
        self.slider_x
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn dial_instrument(&self) -> &Dial {
        &self.dial_instrument
    }

    pub fn dial_pitch(&self) -> &Dial {
        &self.dial_pitch
    }

    pub fn radio_button_tint(&self) -> Color {
        if self.radio_button_dimmed { BLACK } else { WHITE }
    }

    pub fn sound_button_tint(&self) -> Color {
        if self.sound_button_dimmed { BLACK } else { WHITE }
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial::DialOrientation;

    fn state() -> ExhibitState {
        ExhibitState::new(SceneLayout::new())
    }

    fn point_in(rect: Rect) -> Vec2 {
        rect.point() + rect.size() * 0.5
    }

    #[test]
    fn press_state_resets_to_none_on_any_release() {
        let mut exhibit = state();
        let targets = [
            point_in(exhibit.layout.slider_track),
            exhibit.layout.dial_instrument_pivot,
            exhibit.layout.dial_pitch_pivot,
            point_in(exhibit.layout.play_radio),
            vec2(5.0, 5.0),
        ];
        for target in targets {
            exhibit.pointer_down(target);
            exhibit.pointer_up();
            assert_eq!(exhibit.press(), PressState::None);
        }
    }

    #[test]
    fn hit_tests_follow_the_priority_order() {
        let mut exhibit = state();
        exhibit.pointer_down(exhibit.layout.dial_instrument_pivot);
        assert_eq!(exhibit.press(), PressState::DialRight);
        exhibit.pointer_up();

        exhibit.pointer_down(exhibit.layout.dial_pitch_pivot);
        assert_eq!(exhibit.press(), PressState::DialLeft);
        exhibit.pointer_up();

        exhibit.pointer_down(point_in(exhibit.layout.slider_track));
        assert_eq!(exhibit.press(), PressState::Slider);
        exhibit.pointer_up();

        exhibit.pointer_down(point_in(exhibit.layout.play_sound));
        assert_eq!(exhibit.press(), PressState::PlaySound);
    }

    #[test]
    fn slider_clamps_to_its_travel() {
        let mut exhibit = state();
        exhibit.pointer_down(point_in(exhibit.layout.slider_track));
        exhibit.pointer_move(vec2(-1000.0, 420.0));
        assert_eq!(exhibit.slider_x(), SLIDER_MIN_X);
        exhibit.pointer_move(vec2(1000.0, 420.0));
        assert_eq!(exhibit.slider_x(), SLIDER_MAX_X);
        exhibit.pointer_move(vec2(600.0, 420.0));
        assert_eq!(exhibit.slider_x(), 600.0);
    }

    #[test]
    fn slider_drag_to_the_right_clamps_at_the_far_stop() {
        let mut exhibit = state();
        exhibit.pointer_down(vec2(600.0, 420.0));
        assert_eq!(exhibit.press(), PressState::Slider);
        exhibit.pointer_move(vec2(900.0, 420.0));
        assert_eq!(exhibit.slider_x(), SLIDER_MAX_X);
    }

    #[test]
    fn cooldown_rejects_rapid_presses_and_rearms() {
        let mut exhibit = state();
        let button = point_in(exhibit.layout.play_radio);
        exhibit.pointer_down(button);
        assert_eq!(exhibit.press(), PressState::PlayRadio);
        assert_eq!(exhibit.pointer_up(), ReleaseAction::Play);

        // Within the cooldown window the press is silently ignored.
        for _ in 0..30 {
            exhibit.update_tick();
        }
        exhibit.pointer_down(button);
        assert_eq!(exhibit.press(), PressState::None);
        assert_eq!(exhibit.radio_button_tint(), BLACK);
        exhibit.pointer_up();

        // After the counter passes the threshold the tint resets and a
        // press is accepted again.
        for _ in 0..2 {
            exhibit.update_tick();
        }
        assert_eq!(exhibit.radio_button_tint(), WHITE);
        exhibit.pointer_down(button);
        assert_eq!(exhibit.press(), PressState::PlayRadio);
    }

    #[test]
    fn dial_does_not_turn_on_press_alone() {
        let mut exhibit = state();
        let pivot = exhibit.layout.dial_instrument_pivot;
        exhibit.pointer_down(pivot + vec2(20.0, 0.0));
        assert_eq!(
            exhibit.dial_instrument().orientation(),
            DialOrientation::Deg0
        );
    }

    #[test]
    fn east_to_south_drag_selects_the_flute() {
        let mut exhibit = state();
        let pivot = exhibit.layout.dial_instrument_pivot;
        exhibit.pointer_down(pivot + vec2(20.0, 0.0));
        assert_eq!(exhibit.press(), PressState::DialRight);
        exhibit.pointer_move(pivot + vec2(0.0, 50.0));
        assert_eq!(
            exhibit.dial_instrument().orientation(),
            DialOrientation::Deg90
        );
        assert_eq!(
            exhibit.pointer_up(),
            ReleaseAction::InstrumentChanged(Instrument::Flute)
        );
        assert_eq!(exhibit.instrument(), Instrument::Flute);
    }

    #[test]
    fn pitch_dial_drives_the_multiplier_only_at_quarter_detents() {
        let mut exhibit = state();
        let pivot = exhibit.layout.dial_pitch_pivot;
        assert_eq!(exhibit.pitch_update(), None);
        exhibit.pointer_down(pivot);
        exhibit.pointer_move(pivot + vec2(0.0, 50.0));
        exhibit.pointer_up();
        assert_eq!(exhibit.pitch_update(), Some(2.0));
    }

    #[test]
    fn moves_without_a_held_button_change_nothing() {
        let mut exhibit = state();
        exhibit.pointer_move(vec2(600.0, 420.0));
        assert_eq!(exhibit.slider_x(), 568.0);
        assert_eq!(exhibit.press(), PressState::None);
    }

    #[test]
    fn turning_the_pitch_dial_never_touches_the_instrument() {
        let mut exhibit = state();
        let pivot = exhibit.layout.dial_pitch_pivot;
        exhibit.pointer_down(pivot);
        exhibit.pointer_move(pivot + vec2(0.0, 50.0));
        assert_eq!(exhibit.pointer_up(), ReleaseAction::None);
        assert_eq!(exhibit.instrument(), Instrument::Guitar);
    }
}
