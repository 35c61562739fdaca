//! Types for Sun-relative alignment search.

use astro_core::Body;

/// A Sun-relative alignment as seen from Earth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Elongation from the Sun near 0° (or 360°).
    Conjunction,
    /// Elongation near 180°. Geometrically unreachable for bodies
    /// inside Earth's orbit; see [`Body::supports_opposition`].
    Opposition,
}

impl Alignment {
    /// 0 = conjunction, 1 = opposition.
    pub const fn code(self) -> i32 {
        match self {
            Self::Conjunction => 0,
            Self::Opposition => 1,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Conjunction),
            1 => Some(Self::Opposition),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::Opposition => "Opposition",
        }
    }
}

/// A refined alignment instant for one target body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentEvent {
    pub jd_tdb: f64,
    pub alignment: Alignment,
    pub body: Body,
    /// Target−Sun ecliptic longitude difference at the instant, [0, 360).
    pub elongation_deg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        assert_eq!(Alignment::from_code(0), Some(Alignment::Conjunction));
        assert_eq!(Alignment::from_code(1), Some(Alignment::Opposition));
        assert_eq!(Alignment::from_code(2), None);
        assert_eq!(Alignment::Opposition.code(), 1);
    }
}
