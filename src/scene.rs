use macroquad::prelude::*;

pub const SCREEN_WIDTH: f32 = 1000.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Board sprites are pixel art blown up 4x; the slider sits at 3x.
pub const SPRITE_SCALE: f32 = 4.0;
pub const SLIDER_SCALE: f32 = 3.0;

/// Horizontal travel of the slider handle.
pub const SLIDER_MIN_X: f32 = 550.0;
pub const SLIDER_MAX_X: f32 = 710.0;
pub const SLIDER_Y: f32 = 405.0;

const DIAL_NATIVE: (f32, f32) = (14.0, 13.0);
const DIAL_ORIGIN: (f32, f32) = (7.0, 6.5);
const BOARD_NATIVE: (f32, f32) = (150.0, 62.0);
const RADIO_NATIVE: (f32, f32) = (110.0, 90.0);
const PLAY_NATIVE: (f32, f32) = (24.0, 15.0);
const SLIDER_NATIVE: (f32, f32) = (25.0, 8.0);

/// Static widget geometry, computed once at startup. Interactive widgets are
/// hit-tested against these rects; rendering reuses the same table so the
/// picture and the hit boxes cannot drift apart.
#[derive(Clone)]
pub struct SceneLayout {
    pub background: Rect,
    pub board: Rect,
    pub radio: Rect,
    pub dial_instrument_pivot: Vec2,
    pub dial_pitch_pivot: Vec2,
    pub dial_size: Vec2,
    pub play_radio: Rect,
    pub play_sound: Rect,
    pub slider_track: Rect,
    pub slider_size: Vec2,
}

impl SceneLayout {
    pub fn new() -> Self {
        let dial_size = vec2(DIAL_NATIVE.0, DIAL_NATIVE.1) * SPRITE_SCALE;
        let play_size = vec2(PLAY_NATIVE.0, PLAY_NATIVE.1) * SPRITE_SCALE;
        let slider_size = vec2(SLIDER_NATIVE.0, SLIDER_NATIVE.1) * SLIDER_SCALE;
        Self {
            background: Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
            board: Rect::new(
                50.0,
                300.0,
                BOARD_NATIVE.0 * SPRITE_SCALE,
                BOARD_NATIVE.1 * SPRITE_SCALE,
            ),
            radio: Rect::new(
                400.0,
                125.0,
                RADIO_NATIVE.0 * SPRITE_SCALE,
                RADIO_NATIVE.1 * SPRITE_SCALE,
            ),
            dial_instrument_pivot: vec2(755.0, 365.0),
            dial_pitch_pivot: vec2(505.0, 365.0),
            dial_size,
            play_radio: Rect::new(568.0, 290.0, play_size.x, play_size.y),
            play_sound: Rect::new(135.0, 400.0, play_size.x, play_size.y),
            // The track is wider than the handle travel so a press just off
            // the handle still grabs it; rotated 90 degrees the handle spans
            // its native width vertically.
            slider_track: Rect::new(535.0, SLIDER_Y, 177.0, slider_size.x),
            slider_size,
        }
    }

    /// Axis-aligned bounds of a dial, centered on its pivot.
    pub fn dial_bounds(&self, pivot: Vec2) -> Rect {
        Rect::new(
            pivot.x - DIAL_ORIGIN.0 * SPRITE_SCALE,
            pivot.y - DIAL_ORIGIN.1 * SPRITE_SCALE,
            self.dial_size.x,
            self.dial_size.y,
        )
    }

    /// Where a dial's top-left corner lands when drawn around its pivot.
    pub fn dial_top_left(&self, pivot: Vec2) -> Vec2 {
        vec2(
            pivot.x - DIAL_ORIGIN.0 * SPRITE_SCALE,
            pivot.y - DIAL_ORIGIN.1 * SPRITE_SCALE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_track_covers_the_full_travel() {
        let layout = SceneLayout::new();
        assert!(layout.slider_track.contains(vec2(SLIDER_MIN_X, SLIDER_Y + 1.0)));
        assert!(layout.slider_track.contains(vec2(SLIDER_MAX_X, SLIDER_Y + 1.0)));
    }

    #[test]
    fn dial_bounds_are_centered_on_the_pivot() {
        let layout = SceneLayout::new();
        let bounds = layout.dial_bounds(layout.dial_instrument_pivot);
        assert!(bounds.contains(layout.dial_instrument_pivot));
        let center = bounds.point() + bounds.size() * 0.5;
        assert!((center - layout.dial_instrument_pivot).length() < 0.001);
    }

    #[test]
    fn interactive_widgets_do_not_overlap() {
        let layout = SceneLayout::new();
        let instrument = layout.dial_bounds(layout.dial_instrument_pivot);
        let pitch = layout.dial_bounds(layout.dial_pitch_pivot);
        assert!(instrument.intersect(pitch).is_none());
        assert!(layout.play_radio.intersect(layout.play_sound).is_none());
        assert!(layout.play_radio.intersect(layout.slider_track).is_none());
    }
}
