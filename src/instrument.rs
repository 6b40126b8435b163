use crate::dial::DialOrientation;

/// The four instruments the exhibit can play, one per dial detent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instrument {
    Guitar,
    Flute,
    Piano,
    Drum,
}

impl Instrument {
    pub fn from_orientation(orientation: DialOrientation) -> Self {
        match orientation {
            DialOrientation::Deg0 => Instrument::Guitar,
            DialOrientation::Deg90 => Instrument::Flute,
            DialOrientation::Deg180 => Instrument::Piano,
            DialOrientation::Deg270 => Instrument::Drum,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Instrument::Guitar => "GUITAR",
            Instrument::Flute => "FLUTE",
            Instrument::Piano => "PIANO",
            Instrument::Drum => "DRUM",
        }
    }

    pub fn sound_path(&self) -> &'static str {
        match self {
            Instrument::Guitar => "ASSETS/SOUNDS/GuitarC.wav",
            Instrument::Flute => "ASSETS/SOUNDS/FluteC.wav",
            Instrument::Piano => "ASSETS/SOUNDS/PianoC.wav",
            Instrument::Drum => "ASSETS/SOUNDS/DrumHiHat.wav",
        }
    }
}

pub const PITCH_HIGH: f32 = 2.0;
pub const PITCH_LOW: f32 = 0.75;

/// Pitch multiplier for a pitch-dial detent. 0 and 180 degrees return None:
/// the voice keeps whatever multiplier it last had.
pub fn pitch_for_orientation(orientation: DialOrientation) -> Option<f32> {
    match orientation {
        DialOrientation::Deg90 => Some(PITCH_HIGH),
        DialOrientation::Deg270 => Some(PITCH_LOW),
        DialOrientation::Deg0 | DialOrientation::Deg180 => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_is_total_and_pure() {
        let expected = [
            (DialOrientation::Deg0, Instrument::Guitar),
            (DialOrientation::Deg90, Instrument::Flute),
            (DialOrientation::Deg180, Instrument::Piano),
            (DialOrientation::Deg270, Instrument::Drum),
        ];
        for (orientation, instrument) in expected {
            assert_eq!(Instrument::from_orientation(orientation), instrument);
            // Resolving twice yields the same answer.
            assert_eq!(
                Instrument::from_orientation(orientation),
                Instrument::from_orientation(orientation)
            );
        }
    }

    #[test]
    fn pitch_set_only_at_quarter_detents() {
        assert_eq!(
            pitch_for_orientation(DialOrientation::Deg90),
            Some(PITCH_HIGH)
        );
        assert_eq!(
            pitch_for_orientation(DialOrientation::Deg270),
            Some(PITCH_LOW)
        );
        assert_eq!(pitch_for_orientation(DialOrientation::Deg0), None);
        assert_eq!(pitch_for_orientation(DialOrientation::Deg180), None);
    }

    #[test]
    fn every_instrument_has_a_sound_file() {
        for orientation in DialOrientation::VALUES {
            let instrument = Instrument::from_orientation(orientation);
            assert!(instrument.sound_path().ends_with(".wav"));
        }
    }
}
