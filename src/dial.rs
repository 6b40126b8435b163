use macroquad::prelude::*;

/// One of the four detent positions a dial can rest at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialOrientation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl DialOrientation {
    pub const VALUES: [DialOrientation; 4] = [
        DialOrientation::Deg0,
        DialOrientation::Deg90,
        DialOrientation::Deg180,
        DialOrientation::Deg270,
    ];

    pub fn degrees(self) -> f32 {
        match self {
            DialOrientation::Deg0 => 0.0,
            DialOrientation::Deg90 => 90.0,
            DialOrientation::Deg180 => 180.0,
            DialOrientation::Deg270 => 270.0,
        }
    }

    fn from_snapped(degrees: i32) -> Self {
        match degrees {
            90 => DialOrientation::Deg90,
            180 => DialOrientation::Deg180,
            270 => DialOrientation::Deg270,
            _ => DialOrientation::Deg0,
        }
    }
}

/// Quantizes a pointer angle in degrees into a 90-degree detent.
/// The +179 offset and truncating division set the detent boundaries;
/// the 360 bucket wraps back to 0.
pub fn snap_degrees(degrees: f32) -> i32 {
    (((degrees + 179.0) as i32 / 90 + 1) * 90).rem_euclid(360)
}

/// Maps a pointer position to the detent the dial snaps to. The angle is
/// taken from the pivot-minus-pointer displacement, matching the exhibit's
/// dial hardware orientation.
pub fn snap_orientation(pivot: Vec2, pointer: Vec2) -> DialOrientation {
    let displacement = pivot - pointer;
    let degrees = displacement.y.atan2(displacement.x).to_degrees();
    DialOrientation::from_snapped(snap_degrees(degrees))
}

pub struct Dial {
    pivot: Vec2,
    orientation: DialOrientation,
}

impl Dial {
    pub fn new(pivot: Vec2) -> Self {
        Self {
            pivot,
            orientation: DialOrientation::Deg0,
        }
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    pub fn orientation(&self) -> DialOrientation {
        self.orientation
    }

    /// Re-snaps the dial to follow the pointer during a drag.
    pub fn track(&mut self, pointer: Vec2) {
        self.orientation = snap_orientation(self.pivot, pointer);
    }

    #[cfg(test)]
    pub fn set_orientation(&mut self, orientation: DialOrientation) {
        self.orientation = orientation;
    }
}
