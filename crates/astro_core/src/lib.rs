//! Ephemeris query engine.
//!
//! This crate provides the [`Ephemeris`] provider seam — the contract the
//! event search is written against — and the concrete [`Engine`] that
//! answers queries from loaded SPK kernels by chaining segments through
//! the NAIF body hierarchy.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use spk_kernel::{KernelError, SpkEvaluation, SpkKernel};

/// Engine configuration used at startup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub spk_paths: Vec<PathBuf>,
}

impl EngineConfig {
    /// Convenience constructor for single-kernel use.
    pub fn with_single_spk(spk_path: PathBuf) -> Self {
        Self {
            spk_paths: vec![spk_path],
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.spk_paths.is_empty() {
            return Err(EngineError::InvalidConfig("spk_paths must not be empty"));
        }
        for path in &self.spk_paths {
            if path.as_os_str().is_empty() {
                return Err(EngineError::InvalidConfig(
                    "spk_paths must not contain empty paths",
                ));
            }
        }
        Ok(())
    }
}

/// Bodies supported by the query contract.
///
/// These exist as SPK segments (directly or via their barycenter) in the
/// standard DE kernels. Earth is the observer in every search this tool
/// runs and is not a user-selectable target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// The ten user-selectable targets, in the order the CLI lists them.
pub const SUPPORTED_TARGETS: [Body; 10] = [
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::Moon,
    Body::Sun,
];

impl Body {
    /// NAIF body code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 10,
            Self::Mercury => 199,
            Self::Venus => 299,
            Self::Earth => 399,
            Self::Moon => 301,
            Self::Mars => 499,
            Self::Jupiter => 599,
            Self::Saturn => 699,
            Self::Uranus => 799,
            Self::Neptune => 899,
            Self::Pluto => 999,
        }
    }

    /// Convert a NAIF body code into a [`Body`].
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            10 => Some(Self::Sun),
            199 => Some(Self::Mercury),
            299 => Some(Self::Venus),
            399 => Some(Self::Earth),
            301 => Some(Self::Moon),
            499 => Some(Self::Mars),
            599 => Some(Self::Jupiter),
            699 => Some(Self::Saturn),
            799 => Some(Self::Uranus),
            899 => Some(Self::Neptune),
            999 => Some(Self::Pluto),
            _ => None,
        }
    }

    /// Lowercase body name, as accepted on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Earth => "earth",
            Self::Moon => "moon",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
        }
    }

    /// Parse a lowercase body name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sun" => Some(Self::Sun),
            "mercury" => Some(Self::Mercury),
            "venus" => Some(Self::Venus),
            "earth" => Some(Self::Earth),
            "moon" => Some(Self::Moon),
            "mars" => Some(Self::Mars),
            "jupiter" => Some(Self::Jupiter),
            "saturn" => Some(Self::Saturn),
            "uranus" => Some(Self::Uranus),
            "neptune" => Some(Self::Neptune),
            "pluto" => Some(Self::Pluto),
            _ => None,
        }
    }

    /// Whether opposition to the Sun is geometrically reachable as seen
    /// from Earth. Bodies inside Earth's orbit never stray far enough
    /// from the Sun; for them only conjunctions occur.
    pub const fn supports_opposition(self) -> bool {
        matches!(
            self,
            Self::Moon
                | Self::Mars
                | Self::Jupiter
                | Self::Saturn
                | Self::Uranus
                | Self::Neptune
                | Self::Pluto
        )
    }
}

/// Observer used to evaluate relative state vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observer {
    SolarSystemBarycenter,
    Body(Body),
}

/// Output reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    IcrfJ2000,
    EclipticJ2000,
}

/// Single ephemeris request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub target: Body,
    pub observer: Observer,
    pub frame: Frame,
    pub epoch_tdb_jd: f64,
}

/// Cartesian state vector output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Core engine errors.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    InvalidConfig(&'static str),
    InvalidQuery(&'static str),
    KernelLoad(String),
    UnsupportedQuery(&'static str),
    /// The epoch falls outside the loaded ephemeris coverage. Kept
    /// distinct so callers can report a truncated span instead of a
    /// generic failure.
    EpochOutOfRange { epoch_tdb_jd: f64 },
    Internal(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            Self::KernelLoad(msg) => write!(f, "kernel load error: {msg}"),
            Self::UnsupportedQuery(msg) => write!(f, "unsupported query: {msg}"),
            Self::EpochOutOfRange { epoch_tdb_jd } => {
                write!(f, "epoch out of ephemeris range: JD {epoch_tdb_jd}")
            }
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl Error for EngineError {}

/// The provider contract the event search is written against.
///
/// The concrete [`Engine`] implements it over SPK kernels; tests
/// implement it with synthetic models. The search crates never name
/// `Engine` directly.
pub trait Ephemeris {
    /// Evaluate an ephemeris query, returning a Cartesian state vector.
    fn state(&self, query: Query) -> Result<StateVector, EngineError>;

    /// Valid epoch coverage as `(start, end)` TDB Julian Dates.
    fn coverage_jd_tdb(&self) -> (f64, f64);
}

/// Core query engine.
///
/// `Engine` is `Send + Sync`: kernels are immutable after load, so one
/// engine can be shared across threads behind an `Arc` if independent
/// queries are ever parallelized.
pub struct Engine {
    config: EngineConfig,
    spk_kernels: Vec<SpkKernel>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let total_segments: usize = self.spk_kernels.iter().map(|k| k.segments().len()).sum();
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("spk_kernel_count", &self.spk_kernels.len())
            .field("spk_total_segments", &total_segments)
            .finish()
    }
}

impl Engine {
    /// Create a new engine, loading SPK kernels from the config paths.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut spk_kernels = Vec::with_capacity(config.spk_paths.len());
        for path in &config.spk_paths {
            let spk = SpkKernel::load(path).map_err(|e| EngineError::KernelLoad(e.to_string()))?;
            spk_kernels.push(spk);
        }
        Ok(Self {
            config,
            spk_kernels,
        })
    }

    /// Build an engine from already-parsed kernels.
    pub fn from_kernels(spk_kernels: Vec<SpkKernel>) -> Result<Self, EngineError> {
        if spk_kernels.is_empty() {
            return Err(EngineError::InvalidConfig(
                "at least one kernel is required",
            ));
        }
        Ok(Self {
            config: EngineConfig { spk_paths: vec![] },
            spk_kernels,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Access the loaded SPK kernels.
    pub fn spk_kernels(&self) -> &[SpkKernel] {
        &self.spk_kernels
    }

    /// Evaluate (target, center) at epoch from the first kernel with a
    /// matching segment.
    fn evaluate_across(
        &self,
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    ) -> Result<SpkEvaluation, KernelError> {
        for kernel in &self.spk_kernels {
            match kernel.evaluate(target, center, epoch_tdb_s) {
                Ok(eval) => return Ok(eval),
                Err(KernelError::EpochOutOfRange { .. }) => continue,
                Err(KernelError::SegmentNotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(KernelError::EpochOutOfRange {
            target,
            center,
            epoch_tdb_s,
        })
    }

    /// Find the center body for a target across all kernels.
    fn center_for_across(&self, target: i32) -> Option<i32> {
        for kernel in &self.spk_kernels {
            if let Some(center) = kernel.center_for(target) {
                return Some(center);
            }
        }
        None
    }

    /// Resolve a body to the solar-system barycenter (code 0) by walking
    /// the segment chain. Planet codes with no segment of their own fall
    /// back to their barycenter (x99 → x).
    fn resolve_to_ssb(
        &self,
        body_code: i32,
        epoch_tdb_s: f64,
        epoch_tdb_jd: f64,
    ) -> Result<[f64; 6], EngineError> {
        let mut code = body_code;
        let mut state = [0.0f64; 6];

        while code != 0 {
            let center = match self.center_for_across(code) {
                Some(c) => c,
                None => {
                    let bary = spk_kernel::planet_body_to_barycenter(code);
                    if bary != code {
                        code = bary;
                        continue;
                    }
                    return Err(EngineError::KernelLoad(format!(
                        "no segment chain from body {code} to the barycenter"
                    )));
                }
            };

            let eval = match self.evaluate_across(code, center, epoch_tdb_s) {
                Ok(eval) => eval,
                Err(KernelError::EpochOutOfRange { .. }) => {
                    return Err(EngineError::EpochOutOfRange { epoch_tdb_jd });
                }
                Err(e) => return Err(EngineError::Internal(e.to_string())),
            };
            for i in 0..3 {
                state[i] += eval.position_km[i];
                state[i + 3] += eval.velocity_km_s[i];
            }

            code = center;
        }

        Ok(state)
    }

    /// Evaluate an ephemeris query, returning a Cartesian state vector.
    pub fn query(&self, query: Query) -> Result<StateVector, EngineError> {
        if !query.epoch_tdb_jd.is_finite() {
            return Err(EngineError::InvalidQuery("epoch_tdb_jd must be finite"));
        }
        if let Observer::Body(body) = query.observer {
            if body == query.target {
                return Err(EngineError::UnsupportedQuery(
                    "target and observer body cannot be identical",
                ));
            }
        }

        let epoch_tdb_s = astro_time::jd_to_tdb_seconds(query.epoch_tdb_jd);

        let target_ssb =
            self.resolve_to_ssb(query.target.code(), epoch_tdb_s, query.epoch_tdb_jd)?;
        let observer_ssb = match query.observer {
            Observer::SolarSystemBarycenter => [0.0f64; 6],
            Observer::Body(body) => {
                self.resolve_to_ssb(body.code(), epoch_tdb_s, query.epoch_tdb_jd)?
            }
        };

        let mut state = StateVector {
            position_km: [
                target_ssb[0] - observer_ssb[0],
                target_ssb[1] - observer_ssb[1],
                target_ssb[2] - observer_ssb[2],
            ],
            velocity_km_s: [
                target_ssb[3] - observer_ssb[3],
                target_ssb[4] - observer_ssb[4],
                target_ssb[5] - observer_ssb[5],
            ],
        };

        if query.frame == Frame::EclipticJ2000 {
            state.position_km = astro_frames::icrf_to_ecliptic(&state.position_km);
            state.velocity_km_s = astro_frames::icrf_to_ecliptic(&state.velocity_km_s);
        }

        Ok(state)
    }
}

impl Ephemeris for Engine {
    fn state(&self, query: Query) -> Result<StateVector, EngineError> {
        self.query(query)
    }

    fn coverage_jd_tdb(&self) -> (f64, f64) {
        let mut start = f64::NEG_INFINITY;
        let mut end = f64::INFINITY;
        for kernel in &self.spk_kernels {
            let (s, e) = kernel.coverage_et();
            start = start.max(s);
            end = end.min(e);
        }
        (
            astro_time::tdb_seconds_to_jd(start),
            astro_time::tdb_seconds_to_jd(end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_paths() {
        let config = EngineConfig { spk_paths: vec![] };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_rejects_empty_path_entry() {
        let config = EngineConfig {
            spk_paths: vec![PathBuf::new()],
        };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn from_kernels_rejects_empty() {
        assert!(matches!(
            Engine::from_kernels(vec![]),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn body_code_roundtrip() {
        for body in SUPPORTED_TARGETS {
            assert_eq!(Body::from_code(body.code()), Some(body));
        }
        assert_eq!(Body::from_code(399), Some(Body::Earth));
        assert_eq!(Body::from_code(123), None);
    }

    #[test]
    fn body_name_roundtrip() {
        for body in SUPPORTED_TARGETS {
            assert_eq!(Body::from_name(body.name()), Some(body));
        }
        assert_eq!(Body::from_name("vulcan"), None);
        assert_eq!(Body::from_name("Moon"), None); // lowercase only
    }

    #[test]
    fn opposition_capability() {
        assert!(!Body::Mercury.supports_opposition());
        assert!(!Body::Venus.supports_opposition());
        assert!(!Body::Sun.supports_opposition());
        assert!(Body::Mars.supports_opposition());
        assert!(Body::Moon.supports_opposition());
        assert!(Body::Pluto.supports_opposition());
    }

    // Compile-time assertion: Engine must be Send + Sync.
    #[allow(dead_code)]
    const _: () = {
        fn assert_send_sync<T: Send + Sync>() {}
        fn check() {
            assert_send_sync::<Engine>();
        }
    };
}
