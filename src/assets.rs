use std::sync::Arc;

use macroquad::prelude::*;

use crate::instrument::Instrument;
use crate::wav::SoundBuffer;

/// Every texture, font, and sound buffer the exhibit uses, loaded once at
/// startup and held for the process lifetime. A failed load is reported to
/// the log and replaced with a blank texture or silent buffer; the exhibit
/// keeps running either way.
pub struct AssetStore {
    pub font: Option<Font>,
    pub background: Texture2D,
    pub board: Texture2D,
    pub radio: Texture2D,
    pub dial: Texture2D,
    pub play_radio: Texture2D,
    pub play_sound: Texture2D,
    pub slider: Texture2D,
    guitar: Arc<SoundBuffer>,
    flute: Arc<SoundBuffer>,
    piano: Arc<SoundBuffer>,
    drum: Arc<SoundBuffer>,
}

impl AssetStore {
    pub async fn load() -> Self {
        let font = match load_ttf_font("ASSETS/FONTS/ariblk.ttf").await {
            Ok(font) => Some(font),
            Err(err) => {
                warn!("problem loading ariblk.ttf: {err:?}");
                None
            }
        };
        Self {
            font,
            background: load_texture_or_blank("ASSETS/IMAGES/background.png").await,
            board: load_texture_or_blank("ASSETS/IMAGES/board.png").await,
            radio: load_texture_or_blank("ASSETS/IMAGES/radio.png").await,
            dial: load_texture_or_blank("ASSETS/IMAGES/dial.png").await,
            play_radio: load_texture_or_blank("ASSETS/IMAGES/playRadio.png").await,
            play_sound: load_texture_or_blank("ASSETS/IMAGES/playSound.png").await,
            slider: load_texture_or_blank("ASSETS/IMAGES/slider.png").await,
            guitar: load_buffer_or_silent(Instrument::Guitar),
            flute: load_buffer_or_silent(Instrument::Flute),
            piano: load_buffer_or_silent(Instrument::Piano),
            drum: load_buffer_or_silent(Instrument::Drum),
        }
    }

    pub fn buffer_for(&self, instrument: Instrument) -> Arc<SoundBuffer> {
        match instrument {
            Instrument::Guitar => self.guitar.clone(),
            Instrument::Flute => self.flute.clone(),
            Instrument::Piano => self.piano.clone(),
            Instrument::Drum => self.drum.clone(),
        }
    }
}

async fn load_texture_or_blank(path: &str) -> Texture2D {
    match load_texture(path).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            texture
        }
        Err(err) => {
            warn!("problem loading {path}: {err:?}");
            Texture2D::empty()
        }
    }
}

fn load_buffer_or_silent(instrument: Instrument) -> Arc<SoundBuffer> {
    match SoundBuffer::open(instrument.sound_path()) {
        Ok(buffer) => Arc::new(buffer),
        Err(err) => {
            warn!("problem loading {}: {err:#}", instrument.sound_path());
            Arc::new(SoundBuffer::silent())
        }
    }
}
