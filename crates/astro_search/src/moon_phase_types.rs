//! Types for moon-phase search.

/// The four principal moon phases, one per quadrant of Moon−Sun
/// ecliptic longitude difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl MoonPhase {
    /// Quadrant code: 0 = new, 1 = first quarter, 2 = full, 3 = last quarter.
    pub const fn code(self) -> i32 {
        match self {
            Self::New => 0,
            Self::FirstQuarter => 1,
            Self::Full => 2,
            Self::LastQuarter => 3,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::New),
            1 => Some(Self::FirstQuarter),
            2 => Some(Self::Full),
            3 => Some(Self::LastQuarter),
            _ => None,
        }
    }

    /// Total mapping from a quadrant code; wraps modulo 4.
    pub(crate) const fn from_quadrant(code: i32) -> Self {
        match code.rem_euclid(4) {
            0 => Self::New,
            1 => Self::FirstQuarter,
            2 => Self::Full,
            _ => Self::LastQuarter,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::New => "New Moon",
            Self::FirstQuarter => "First Quarter",
            Self::Full => "Full Moon",
            Self::LastQuarter => "Last Quarter",
        }
    }
}

/// A moon-phase transition instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPhaseEvent {
    pub jd_tdb: f64,
    /// The phase the Moon entered at this instant.
    pub phase: MoonPhase,
    pub moon_longitude_deg: f64,
    pub sun_longitude_deg: f64,
}
