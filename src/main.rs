mod assets;
mod audio;
mod dial;
mod exhibit;
mod instrument;
mod scene;
mod wav;

use assets::AssetStore;
use audio::{AudioEngine, PlayerCommand, spawn_player};
use exhibit::{ExhibitState, ReleaseAction};
use instrument::Instrument;
use macroquad::prelude::*;
use scene::{SCREEN_HEIGHT, SCREEN_WIDTH, SLIDER_Y, SceneLayout};
use tokio::runtime::Runtime;

const TIME_PER_FRAME: f32 = 1.0 / 60.0;

#[macroquad::main(window_conf)]
async fn main() {
    let runtime = Runtime::new().expect("tokio runtime");
    let (voice, player) = spawn_player(&runtime);
    let _audio = match AudioEngine::start(voice.clone()) {
        Ok(engine) => Some(engine),
        Err(err) => {
            warn!("audio output unavailable, continuing silent: {err:#}");
            None
        }
    };

    let store = AssetStore::load().await;
    let mut state = ExhibitState::new(SceneLayout::new());
    let _ = player.send(PlayerCommand::SetBuffer(store.buffer_for(state.instrument())));

    let mut accumulator = 0.0f32;
    let mut last_mouse = mouse_position_vec();
    loop {
        accumulator += get_frame_time();

        let mouse = mouse_position_vec();
        if is_mouse_button_pressed(MouseButton::Left) {
            state.pointer_down(mouse);
        }
        // Dials and the slider only react to actual pointer motion, never
        // to the press itself.
        if mouse != last_mouse {
            state.pointer_move(mouse);
            last_mouse = mouse;
        }
        if is_mouse_button_released(MouseButton::Left) {
            match state.pointer_up() {
                ReleaseAction::Play => {
                    let _ = player.send(PlayerCommand::Play);
                }
                ReleaseAction::InstrumentChanged(instrument) => {
                    let _ = player.send(PlayerCommand::SetBuffer(store.buffer_for(instrument)));
                }
                ReleaseAction::None => {}
            }
        }
        handle_keys(&mut state, &store, &player);

        while accumulator > TIME_PER_FRAME {
            accumulator -= TIME_PER_FRAME;
            state.update_tick();
            if let Some(pitch) = state.pitch_update() {
                let _ = player.send(PlayerCommand::SetPitch(pitch));
            }
        }

        if state.exit_requested() {
            break;
        }

        draw_scene(&store, &state);
        next_frame().await;
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Radio Exhibit".into(),
        fullscreen: false,
        sample_count: 1,
        window_width: SCREEN_WIDTH as i32,
        window_height: SCREEN_HEIGHT as i32,
        high_dpi: false,
        ..Default::default()
    }
}

fn mouse_position_vec() -> Vec2 {
    let (x, y) = mouse_position();
    vec2(x, y)
}

/// Escape exits; G/F/P/D force an instrument directly, bypassing the dial.
fn handle_keys(
    state: &mut ExhibitState,
    store: &AssetStore,
    player: &std::sync::mpsc::Sender<PlayerCommand>,
) {
    if is_key_pressed(KeyCode::Escape) {
        state.request_exit();
    }
    let forced = if is_key_pressed(KeyCode::G) {
        Some(Instrument::Guitar)
    } else if is_key_pressed(KeyCode::F) {
        Some(Instrument::Flute)
    } else if is_key_pressed(KeyCode::P) {
        Some(Instrument::Piano)
    } else if is_key_pressed(KeyCode::D) {
        Some(Instrument::Drum)
    } else {
        None
    };
    if let Some(instrument) = forced {
        state.set_instrument(instrument);
        let _ = player.send(PlayerCommand::SetBuffer(store.buffer_for(instrument)));
    }
}

fn draw_scene(store: &AssetStore, state: &ExhibitState) {
    let layout = state.layout();
    clear_background(WHITE);
    draw_widget(&store.background, layout.background, WHITE);
    draw_widget(&store.radio, layout.radio, WHITE);
    draw_dial(store, state, true);
    draw_dial(store, state, false);
    draw_widget(&store.board, layout.board, WHITE);
    draw_widget(&store.play_radio, layout.play_radio, state.radio_button_tint());
    draw_widget(&store.play_sound, layout.play_sound, state.sound_button_tint());
    draw_slider(store, state);
    draw_instrument_label(store, state);
}

fn draw_widget(texture: &Texture2D, dest: Rect, tint: Color) {
    draw_texture_ex(
        texture,
        dest.x,
        dest.y,
        tint,
        DrawTextureParams {
            dest_size: Some(dest.size()),
            ..Default::default()
        },
    );
}

fn draw_dial(store: &AssetStore, state: &ExhibitState, instrument: bool) {
    let layout = state.layout();
    let dial = if instrument {
        state.dial_instrument()
    } else {
        state.dial_pitch()
    };
    let top_left = layout.dial_top_left(dial.pivot());
    draw_texture_ex(
        &store.dial,
        top_left.x,
        top_left.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(layout.dial_size),
            rotation: dial.orientation().degrees().to_radians(),
            pivot: Some(dial.pivot()),
            ..Default::default()
        },
    );
}

fn draw_slider(store: &AssetStore, state: &ExhibitState) {
    let layout = state.layout();
    // The handle art is horizontal; it stands upright rotated a quarter
    // turn about its own top-left corner.
    draw_texture_ex(
        &store.slider,
        state.slider_x(),
        SLIDER_Y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(layout.slider_size),
            rotation: 90.0f32.to_radians(),
            pivot: Some(vec2(state.slider_x(), SLIDER_Y)),
            ..Default::default()
        },
    );
}

fn draw_instrument_label(store: &AssetStore, state: &ExhibitState) {
    draw_text_ex(
        state.instrument().label(),
        160.0,
        392.0,
        TextParams {
            font: store.font.as_ref(),
            font_size: 24,
            color: DARKBROWN,
            ..Default::default()
        },
    );
}
