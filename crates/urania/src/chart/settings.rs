use serde::{Deserialize, Serialize};

/// Wheel presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Horoscope,
    Cosmogram,
}

impl ChartMode {
    pub const ALL: [ChartMode; 2] = [ChartMode::Horoscope, ChartMode::Cosmogram];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartMode::Horoscope => "horoscope",
            ChartMode::Cosmogram => "cosmogram",
        }
    }

    pub fn parse(s: &str) -> Option<ChartMode> {
        ChartMode::ALL.iter().copied().find(|m| m.as_str() == s)
    }
}

/// Whether the run tracks the natal wheel alone or overlays a transit layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Radix,
    Transit,
}

impl ChartType {
    pub const ALL: [ChartType; 2] = [ChartType::Radix, ChartType::Transit];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Radix => "radix",
            ChartType::Transit => "transit",
        }
    }

    pub fn parse(s: &str) -> Option<ChartType> {
        ChartType::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    #[default]
    Tropical,
    Sidereal,
}

impl Zodiac {
    pub const ALL: [Zodiac; 2] = [Zodiac::Tropical, Zodiac::Sidereal];

    pub fn as_str(self) -> &'static str {
        match self {
            Zodiac::Tropical => "tropical",
            Zodiac::Sidereal => "sidereal",
        }
    }

    pub fn parse(s: &str) -> Option<Zodiac> {
        Zodiac::ALL.iter().copied().find(|z| z.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    #[default]
    Placidus,
    WholeSign,
    Koch,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 8] = [
        HouseSystem::Placidus,
        HouseSystem::WholeSign,
        HouseSystem::Koch,
        HouseSystem::Equal,
        HouseSystem::Regiomontanus,
        HouseSystem::Campanus,
        HouseSystem::Alcabitius,
        HouseSystem::Morinus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::WholeSign => "whole_sign",
            HouseSystem::Koch => "koch",
            HouseSystem::Equal => "equal",
            HouseSystem::Regiomontanus => "regiomontanus",
            HouseSystem::Campanus => "campanus",
            HouseSystem::Alcabitius => "alcabitius",
            HouseSystem::Morinus => "morinus",
        }
    }

    pub fn parse(s: &str) -> Option<HouseSystem> {
        HouseSystem::ALL.iter().copied().find(|h| h.as_str() == s)
    }

    /// House system byte the Swiss Ephemeris expects.
    pub fn to_byte(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Alcabitius => b'A',
            HouseSystem::Morinus => b'M',
        }
    }
}

/// Ayanamsa for sidereal calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    #[default]
    Lahiri,
    FaganBradley,
    Raman,
    Krishnamurti,
    TrueCitra,
}

impl Ayanamsa {
    pub const ALL: [Ayanamsa; 5] = [
        Ayanamsa::Lahiri,
        Ayanamsa::FaganBradley,
        Ayanamsa::Raman,
        Ayanamsa::Krishnamurti,
        Ayanamsa::TrueCitra,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Ayanamsa::Lahiri => "lahiri",
            Ayanamsa::FaganBradley => "fagan_bradley",
            Ayanamsa::Raman => "raman",
            Ayanamsa::Krishnamurti => "krishnamurti",
            Ayanamsa::TrueCitra => "true_citra",
        }
    }

    pub fn parse(s: &str) -> Option<Ayanamsa> {
        Ayanamsa::ALL.iter().copied().find(|a| a.as_str() == s)
    }

    /// Sidereal mode constant the Swiss Ephemeris expects.
    pub fn sidereal_mode(self) -> i32 {
        match self {
            Ayanamsa::Lahiri => 1,
            Ayanamsa::FaganBradley => 2,
            Ayanamsa::Raman => 4,
            Ayanamsa::Krishnamurti => 5,
            Ayanamsa::TrueCitra => 8,
        }
    }
}

/// Configuration for one run. Immutable once constructed; changing any field
/// means tearing the scheduler down and starting a new run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub house_system: HouseSystem,
    pub mode: ChartMode,
    pub chart_type: ChartType,
    pub zodiac: Zodiac,
    pub ayanamsa: Option<Ayanamsa>,
    /// Foreground hex color for the rendering collaborator.
    pub stroke: Option<String>,
    /// Background hex color for the rendering collaborator.
    pub bg: Option<String>,
    pub aspects_to_cusps: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            mode: ChartMode::Horoscope,
            chart_type: ChartType::Radix,
            zodiac: Zodiac::Tropical,
            ayanamsa: None,
            stroke: None,
            bg: None,
            aspects_to_cusps: false,
        }
    }
}

/// Lowest character code the initials editor cycles through.
pub const INITIAL_CHAR_MIN: u8 = 32;
/// Highest character code the initials editor cycles through.
pub const INITIAL_CHAR_MAX: u8 = 128;

/// Observer initials: three character codes streamed in the frame header.
/// Each slot cycles independently within `INITIAL_CHAR_MIN..=INITIAL_CHAR_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initials([u8; 3]);

impl Default for Initials {
    /// "---"
    fn default() -> Self {
        Initials([45, 45, 45])
    }
}

impl Initials {
    pub fn new(codes: [u8; 3]) -> Self {
        Initials(codes.map(|c| c.clamp(INITIAL_CHAR_MIN, INITIAL_CHAR_MAX)))
    }

    /// Parse a three-character string; characters outside the editable code
    /// range are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let chars: Vec<u32> = s.chars().map(|c| c as u32).collect();
        if chars.len() != 3 {
            return None;
        }
        let mut codes = [0u8; 3];
        for (slot, &c) in chars.iter().enumerate() {
            if c < INITIAL_CHAR_MIN as u32 || c > INITIAL_CHAR_MAX as u32 {
                return None;
            }
            codes[slot] = c as u8;
        }
        Some(Initials(codes))
    }

    pub fn codes(&self) -> [u8; 3] {
        self.0
    }

    /// Step one slot up, wrapping from the top of the range to the bottom.
    pub fn increment(&mut self, slot: usize) {
        let c = self.0[slot];
        self.0[slot] = if c == INITIAL_CHAR_MAX { INITIAL_CHAR_MIN } else { c + 1 };
    }

    /// Step one slot down, wrapping from the bottom of the range to the top.
    pub fn decrement(&mut self, slot: usize) {
        let c = self.0[slot];
        self.0[slot] = if c == INITIAL_CHAR_MIN { INITIAL_CHAR_MAX } else { c - 1 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = ChartSettings::default();
        assert_eq!(settings.house_system, HouseSystem::Placidus);
        assert_eq!(settings.mode, ChartMode::Horoscope);
        assert_eq!(settings.chart_type, ChartType::Radix);
        assert_eq!(settings.zodiac, Zodiac::Tropical);
        assert!(!settings.aspects_to_cusps);
    }

    #[test]
    fn test_initials_default_dashes() {
        assert_eq!(Initials::default().codes(), [45, 45, 45]);
    }

    #[test]
    fn test_initials_wrap() {
        let mut initials = Initials::new([INITIAL_CHAR_MAX, INITIAL_CHAR_MIN, 65]);
        initials.increment(0);
        assert_eq!(initials.codes()[0], INITIAL_CHAR_MIN);
        initials.decrement(1);
        assert_eq!(initials.codes()[1], INITIAL_CHAR_MAX);
        initials.increment(2);
        assert_eq!(initials.codes()[2], 66);
    }

    #[test]
    fn test_initials_parse() {
        assert_eq!(Initials::parse("ABC").map(|i| i.codes()), Some([65, 66, 67]));
        assert_eq!(Initials::parse("AB"), None);
        assert_eq!(Initials::parse("A\tC"), None);
    }

    #[test]
    fn test_house_system_bytes() {
        assert_eq!(HouseSystem::Placidus.to_byte(), b'P');
        assert_eq!(HouseSystem::WholeSign.to_byte(), b'W');
        assert_eq!(HouseSystem::parse("campanus"), Some(HouseSystem::Campanus));
        assert_eq!(HouseSystem::parse("topocentric"), None);
    }
}
