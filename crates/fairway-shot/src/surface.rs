//! Surface tags reported by the collider system and the sound cues they map to.

/// Tag attached to every collider or trigger volume the ball can touch.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum SurfaceTag {
    /// Fairway and green turf. Legal ground.
    Grass,
    /// Bunkers. Legal ground.
    Sand,
    /// Inner walls of the cup. Legal ground.
    HoleWalls,
    /// Course boundary walls.
    Walls,
    /// The cup trigger itself.
    Hole,
    /// Water hazard volume.
    Water,
    /// Terrain outside the course (rough, paths, scenery).
    OutOfBounds,
}

impl SurfaceTag {
    /// Parses the scene-side tag name. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "Grass" => Self::Grass,
            "Sand" => Self::Sand,
            "Hole Walls" | "HoleWalls" => Self::HoleWalls,
            "Walls" => Self::Walls,
            "Hole" => Self::Hole,
            "Water" => Self::Water,
            "Out Of Bounds" | "OutOfBounds" => Self::OutOfBounds,
            _ => return None,
        })
    }

    /// Scene-side tag name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Grass => "Grass",
            Self::Sand => "Sand",
            Self::HoleWalls => "Hole Walls",
            Self::Walls => "Walls",
            Self::Hole => "Hole",
            Self::Water => "Water",
            Self::OutOfBounds => "Out Of Bounds",
        }
    }

    /// Whether resting on this surface keeps the ball in bounds.
    pub fn is_legal_ground(self) -> bool {
        matches!(self, Self::Grass | Self::Sand | Self::HoleWalls)
    }

    /// Whether entering this volume resets the shot immediately.
    pub fn is_hazard(self) -> bool {
        matches!(self, Self::Water)
    }

    /// Clip played when the ball hits this surface, if any.
    pub fn hit_clip(self) -> Option<SoundClip> {
        match self {
            Self::Walls => Some(SoundClip::Wall),
            Self::Sand => Some(SoundClip::Sand),
            Self::Hole | Self::HoleWalls => Some(SoundClip::HoleWall),
            Self::Water => Some(SoundClip::Water),
            Self::Grass | Self::OutOfBounds => None,
        }
    }

    /// Lowest volume the hit clip is ever played at.
    pub fn volume_floor(self) -> f32 {
        if self == Self::Water { 1.0 } else { 0.3 }
    }
}

/// Identifier of a one-shot sound cue.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum SoundClip {
    /// Ball against a boundary wall.
    Wall,
    /// Ball landing in sand.
    Sand,
    /// Ball rattling the cup.
    HoleWall,
    /// Splash.
    Water,
    /// Club face striking the ball.
    ClubStrike,
    /// Played after a penalty reset.
    BadShot,
}

/// A collision or overlap involving the ball, as reported by physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEvent {
    /// Solid contact started at `speed` m/s.
    SurfaceEnter { tag: SurfaceTag, speed: f32 },
    SurfaceExit { tag: SurfaceTag },
    /// The ball entered a sensor volume.
    VolumeEnter { tag: SurfaceTag, speed: f32 },
    VolumeExit { tag: SurfaceTag },
}

/// Volume for a surface hit at the given impact speed.
///
/// `clamp(max(floor, speed² / 10), floor, 1.0)`.
pub fn surface_hit_volume(tag: SurfaceTag, impact_speed: f32) -> f32 {
    let floor = tag.volume_floor();
    let raw = (impact_speed * impact_speed / 10.0).max(floor);
    raw.clamp(floor, 1.0)
}
