//! Run configuration: a TOML file deserialized into raw tables, then
//! validated into the runtime types. Defaults are applied here, at
//! construction, never at read time.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use urania::chart::{
    Ayanamsa, ChartMode, ChartSettings, ChartType, HouseSystem, Initials, Zodiac,
};
use urania::layout::Viewport;
use urania::scheduler::RunPlan;
use urania::Instant;

// Fallback observer when no location is configured (Greenwich).
const DEFAULT_LATITUDE: f64 = 51.48;
const DEFAULT_LONGITUDE: f64 = 0.0;

/// Validated configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub plan: RunPlan,
    pub midi: MidiSettings,
    pub ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct MidiSettings {
    /// Device ids to stream to; empty means every available output.
    pub devices: Vec<String>,
    pub client_name: String,
    /// Record frames instead of opening real outputs.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RootToml {
    #[serde(default)]
    origin: Option<InstantToml>,
    #[serde(default)]
    transit: Option<InstantToml>,
    #[serde(default)]
    settings: SettingsToml,
    #[serde(default)]
    identity: IdentityToml,
    #[serde(default)]
    midi: MidiToml,
    #[serde(default)]
    viewport: ViewportToml,
    #[serde(default)]
    ephemeris: EphemerisToml,
}

#[derive(Debug, Clone, Deserialize)]
struct InstantToml {
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    day: Option<u32>,
    #[serde(default = "default_hour")]
    hour: u32,
    #[serde(default)]
    minute: u32,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    current_time: bool,
}

fn default_hour() -> u32 {
    12
}

#[derive(Debug, Clone, Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(rename = "type", default)]
    chart_type: Option<String>,
    #[serde(default)]
    zodiac: Option<String>,
    #[serde(default)]
    ayanamsa: Option<String>,
    #[serde(default)]
    stroke: Option<String>,
    #[serde(default)]
    bg: Option<String>,
    #[serde(default)]
    aspects_to_cusps: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct IdentityToml {
    #[serde(default)]
    initials: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct MidiToml {
    #[serde(default)]
    devices: Vec<String>,
    #[serde(default)]
    client_name: Option<String>,
    #[serde(default)]
    dry_run: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ViewportToml {
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

/// Load and validate a configuration file.
pub fn load(path: &Path) -> anyhow::Result<RunConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("could not read config {}: {}", path.display(), e))?;
    parse(&text)
}

/// Try the conventional config locations; fall back to an all-default run
/// (live clock at the default observer).
pub fn load_or_default() -> anyhow::Result<RunConfig> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if Path::new(p).exists() {
            return load(Path::new(p));
        }
    }
    parse("")
}

/// Parse and validate configuration text.
pub fn parse(text: &str) -> anyhow::Result<RunConfig> {
    let root: RootToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("failed to parse config: {}", e))?;

    let settings = validate_settings(&root.settings)?;

    let origin = build_instant(root.origin.as_ref())?;
    let transit = match settings.chart_type {
        ChartType::Transit => Some(build_instant(root.transit.as_ref())?),
        ChartType::Radix => None,
    };

    let initials = match &root.identity.initials {
        Some(s) => Initials::parse(s)
            .ok_or_else(|| anyhow::anyhow!("initials must be exactly three printable characters, got {:?}", s))?,
        None => Initials::default(),
    };

    let viewport = Viewport {
        width: root.viewport.width.unwrap_or(600.0),
        height: root.viewport.height.unwrap_or(600.0),
    };
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        anyhow::bail!("viewport dimensions must be positive");
    }

    let midi = MidiSettings {
        devices: root.midi.devices,
        client_name: root.midi.client_name.unwrap_or_else(|| "urania".to_string()),
        dry_run: root.midi.dry_run,
    };

    Ok(RunConfig {
        plan: RunPlan {
            origin,
            transit,
            settings,
            initials,
            viewport,
        },
        midi,
        ephemeris_path: root.ephemeris.path,
    })
}

/// Missing tables or date fields fall back the way the interactive form
/// did: no date means "now", no place means the default observer, no time
/// of day means noon.
fn build_instant(table: Option<&InstantToml>) -> anyhow::Result<Instant> {
    let Some(t) = table else {
        return Ok(Instant::current(DEFAULT_LATITUDE, DEFAULT_LONGITUDE));
    };

    let latitude = t.latitude.unwrap_or(DEFAULT_LATITUDE);
    let longitude = t.longitude.unwrap_or(DEFAULT_LONGITUDE);

    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!("latitude out of range: {}", latitude);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("longitude out of range: {}", longitude);
    }

    if t.current_time || t.year.is_none() || t.month.is_none() || t.day.is_none() {
        return Ok(Instant::current(latitude, longitude));
    }

    Instant::new(
        t.year.unwrap(),
        t.month.unwrap(),
        t.day.unwrap(),
        t.hour,
        t.minute,
        latitude,
        longitude,
    )
    .map_err(|e| anyhow::anyhow!("invalid origin/transit instant: {}", e))
}

fn validate_settings(raw: &SettingsToml) -> anyhow::Result<ChartSettings> {
    let mut settings = ChartSettings::default();

    if let Some(s) = &raw.house_system {
        settings.house_system = HouseSystem::parse(s).ok_or_else(|| {
            anyhow::anyhow!(
                "invalid house system {:?}, valid: {:?}",
                s,
                HouseSystem::ALL.map(|h| h.as_str())
            )
        })?;
    }
    if let Some(s) = &raw.mode {
        settings.mode = ChartMode::parse(s).ok_or_else(|| {
            anyhow::anyhow!("invalid mode {:?}, valid: {:?}", s, ChartMode::ALL.map(|m| m.as_str()))
        })?;
    }
    if let Some(s) = &raw.chart_type {
        settings.chart_type = ChartType::parse(s).ok_or_else(|| {
            anyhow::anyhow!("invalid type {:?}, valid: {:?}", s, ChartType::ALL.map(|t| t.as_str()))
        })?;
    }
    if let Some(s) = &raw.zodiac {
        settings.zodiac = Zodiac::parse(s).ok_or_else(|| {
            anyhow::anyhow!("invalid zodiac {:?}, valid: {:?}", s, Zodiac::ALL.map(|z| z.as_str()))
        })?;
    }
    if let Some(s) = &raw.ayanamsa {
        settings.ayanamsa = Some(Ayanamsa::parse(s).ok_or_else(|| {
            anyhow::anyhow!(
                "invalid ayanamsa {:?}, valid: {:?}",
                s,
                Ayanamsa::ALL.map(|a| a.as_str())
            )
        })?);
    }

    settings.stroke = raw.stroke.clone();
    settings.bg = raw.bg.clone();
    settings.aspects_to_cusps = raw.aspects_to_cusps;

    Ok(settings)
}
