//! Almanac CLI: moon phases, conjunctions, and oppositions for a body
//! over a date or date range, printed in UTC and a chosen timezone.

use std::error::Error;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeZone;
use chrono_tz::Tz;
use clap::Parser;

use astro_core::{Body, Engine, EngineConfig, SUPPORTED_TARGETS};
use astro_search::{AlmanacReport, PlannerConfig, plan_range, plan_single_date};
use astro_time::{TimeSpan, UtcTime};

/// NAIF's published DE421 planetary ephemeris (~17 MB, covers
/// 1899–2053).
const KERNEL_URL: &str =
    "https://naif.jpl.nasa.gov/pub/naif/generic_kernels/spk/planets/a_old_versions/de421.bsp";
const DOWNLOAD_TIMEOUT_SECS: u64 = 300;

#[derive(Parser)]
#[command(name = "astro-almanac", about = "Astronomical event almanac")]
struct Cli {
    /// Target body (mercury, venus, mars, jupiter, saturn, uranus,
    /// neptune, pluto, moon, sun)
    #[arg(long)]
    target: Option<String>,

    /// Start date (YYYY-MM-DD). Alone, it is expanded to a ±1 year
    /// window around the date.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD); with --start selects an explicit range
    #[arg(long)]
    end: Option<String>,

    /// IANA timezone for the localized listing
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// Path to the DE421 SPK kernel; downloaded here when missing
    #[arg(long, default_value = "de421.bsp")]
    kernel: PathBuf,

    /// Prompt for inputs instead of reading flags
    #[arg(long)]
    interactive: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut cli = Cli::parse();
    if cli.interactive || cli.target.is_none() {
        prompt_for_inputs(&mut cli)?;
    }

    // Validate every input before touching the network or kernel.
    let target = resolve_target(cli.target.as_deref().unwrap_or_default())?;
    let tz: Tz = cli
        .timezone
        .parse()
        .map_err(|_| format!("unknown timezone '{}'", cli.timezone))?;
    let start = parse_date(
        cli.start
            .as_deref()
            .ok_or("a start date is required (--start YYYY-MM-DD)")?,
    )?;
    let end = cli.end.as_deref().map(parse_date).transpose()?;

    ensure_kernel(&cli.kernel)?;
    let engine = Engine::new(EngineConfig::with_single_spk(cli.kernel.clone()))?;

    let config = PlannerConfig::default();
    let report = match end {
        Some(end) => {
            let span = TimeSpan::new(start.to_jd_tdb(), end.to_jd_tdb())
                .map_err(|_| "start date must not be after end date")?;
            plan_range(&engine, target, span, &config)?
        }
        None => plan_single_date(&engine, target, start.to_jd_tdb(), &config)?,
    };

    render_report(&report, tz);
    Ok(())
}

/// Map a body name to a [`Body`], suggesting the closest supported
/// name on a miss.
fn resolve_target(name: &str) -> Result<Body, String> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return Err("a target body is required (--target moon)".into());
    }
    if let Some(body) = Body::from_name(&normalized) {
        if body == Body::Earth {
            return Err("earth is the observer, not a target".into());
        }
        return Ok(body);
    }

    let mut message = format!("unknown body '{normalized}'");
    if let Some(suggestion) = closest_body_name(&normalized) {
        message.push_str(&format!("; did you mean '{suggestion}'?"));
    }
    Err(message)
}

/// Closest supported body name within edit distance 2.
fn closest_body_name(input: &str) -> Option<&'static str> {
    SUPPORTED_TARGETS
        .iter()
        .map(|b| (b.name(), levenshtein(input, b.name())))
        .filter(|(_, d)| *d <= 2)
        .min_by_key(|(_, d)| *d)
        .map(|(name, _)| name)
}

/// Classic two-row edit distance.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitute.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Parse `YYYY-MM-DD` into midnight UTC.
fn parse_date(text: &str) -> Result<UtcTime, String> {
    let date = chrono::NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{text}' (expected YYYY-MM-DD)"))?;
    use chrono::Datelike;
    Ok(UtcTime::new(date.year(), date.month(), date.day(), 0, 0, 0.0))
}

fn prompt_for_inputs(cli: &mut Cli) -> Result<(), Box<dyn Error>> {
    println!("Astronomical event almanac");
    let names: Vec<&str> = SUPPORTED_TARGETS.iter().map(|b| b.name()).collect();
    println!("Bodies: {}", names.join(", "));

    if cli.target.is_none() {
        cli.target = Some(prompt("Target body")?);
    }
    if cli.start.is_none() {
        let today = chrono::Utc::now().date_naive().to_string();
        let answer = prompt(&format!("Start date YYYY-MM-DD [{today}]"))?;
        cli.start = Some(if answer.is_empty() { today } else { answer });
    }
    if cli.end.is_none() {
        let answer = prompt("End date YYYY-MM-DD (blank for a ±1 year window)")?;
        if !answer.is_empty() {
            cli.end = Some(answer);
        }
    }
    let answer = prompt(&format!("Timezone [{}]", cli.timezone))?;
    if !answer.is_empty() {
        cli.timezone = answer;
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String, io::Error> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Download the kernel if it is not already cached at `path`.
///
/// Writes to a `.part` file first so an interrupted download never
/// leaves a truncated kernel behind.
fn ensure_kernel(path: &Path) -> Result<(), Box<dyn Error>> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    eprintln!("Downloading ephemeris kernel to {} ...", path.display());
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
        .build()?;
    let mut response = client
        .get(KERNEL_URL)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| format!("ephemeris data unavailable: {e}"))?;

    let partial = path.with_extension("bsp.part");
    let mut file = std::fs::File::create(&partial)?;
    response
        .copy_to(&mut file)
        .map_err(|e| format!("ephemeris data unavailable: {e}"))?;
    std::fs::rename(&partial, path)?;
    Ok(())
}

/// Format an event instant as ISO-8601 UTC, minute precision.
fn format_utc_minute(jd_tdb: f64) -> String {
    let u = UtcTime::from_jd_tdb(jd_tdb).rounded_to_minute();
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}Z",
        u.year, u.month, u.day, u.hour, u.minute
    )
}

/// Format an event instant in the target timezone.
fn format_local(jd_tdb: f64, tz: Tz) -> String {
    let u = UtcTime::from_jd_tdb(jd_tdb).rounded_to_minute();
    match chrono::Utc
        .with_ymd_and_hms(u.year, u.month, u.day, u.hour, u.minute, 0)
        .single()
    {
        Some(utc) => utc
            .with_timezone(&tz)
            .format("%A, %B %e, %Y at %H:%M %Z")
            .to_string(),
        None => format_utc_minute(jd_tdb),
    }
}

fn render_report(report: &AlmanacReport, tz: Tz) {
    let start = UtcTime::from_jd_tdb(report.searched.start_jd_tdb()).rounded_to_minute();
    let end = UtcTime::from_jd_tdb(report.searched.end_jd_tdb()).rounded_to_minute();
    println!();
    println!(
        "Events for {} from {start} to {end}",
        report.body.name()
    );
    if report.clipped {
        println!("(span truncated to the ephemeris coverage)");
    }

    println!();
    println!("Moon phases ({} events)", report.moon_phases.len());
    for event in &report.moon_phases {
        println!(
            "  {}  {:<13}  {}",
            format_utc_minute(event.jd_tdb),
            event.phase.name(),
            format_local(event.jd_tdb, tz)
        );
    }

    println!();
    println!(
        "Conjunctions and oppositions of {} ({} events)",
        report.body.name(),
        report.alignments.len()
    );
    for event in &report.alignments {
        println!(
            "  {}  {:<13}  {}",
            format_utc_minute(event.jd_tdb),
            event.alignment.name(),
            format_local(event.jd_tdb, tz)
        );
    }

    println!();
    println!("Notes:");
    println!("  New/full moons occur when the Moon's ecliptic longitude is 0°/180° from the Sun's.");
    println!("  A conjunction places the body behind or beside the Sun as seen from Earth;");
    println!("  an opposition places it opposite the Sun (outer planets and the Moon only).");
    println!("  All instants are geometric, rounded to the minute.");
}
