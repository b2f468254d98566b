//! Audio quality tiers

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Streaming quality tier
///
/// Variants are declared lowest to highest so the derived `Ord` follows the tier order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioQuality {
    /// Lossy, reduced bitrate
    #[serde(alias = "low")]
    Low,

    /// Lossy, high bitrate
    #[serde(alias = "high")]
    High,

    /// CD quality (16-bit / 44.1kHz)
    #[default]
    #[serde(alias = "lossless")]
    Lossless,

    /// Above CD quality (24-bit and/or > 48kHz)
    #[serde(alias = "hi_res_lossless")]
    HiResLossless,
}

impl AudioQuality {
    /// All tiers, lowest first
    pub const ALL: [Self; 4] = [Self::Low, Self::High, Self::Lossless, Self::HiResLossless];

    /// Wire name used by the streaming service
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioQuality::Low => "LOW",
            AudioQuality::High => "HIGH",
            AudioQuality::Lossless => "LOSSLESS",
            AudioQuality::HiResLossless => "HI_RES_LOSSLESS",
        }
    }

    /// Whether this tier is delivered without lossy compression
    pub fn is_lossless(&self) -> bool {
        *self >= AudioQuality::Lossless
    }
}

impl fmt::Display for AudioQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioQuality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "LOW" => Ok(AudioQuality::Low),
            "HIGH" => Ok(AudioQuality::High),
            "LOSSLESS" => Ok(AudioQuality::Lossless),
            "HI_RES_LOSSLESS" | "HI_RES" | "HIRES_LOSSLESS" => Ok(AudioQuality::HiResLossless),
            _ => Err(CoreError::UnknownQuality(s.to_string())),
        }
    }
}

/// Who decided the current quality
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualitySource {
    /// Recomputed from the current track on every track change
    Auto,

    /// Pinned by the user; left alone until changed explicitly
    #[default]
    Manual,
}

impl fmt::Display for QualitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualitySource::Auto => f.write_str("auto"),
            QualitySource::Manual => f.write_str("manual"),
        }
    }
}

impl FromStr for QualitySource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(QualitySource::Auto),
            "manual" => Ok(QualitySource::Manual),
            _ => Err(CoreError::UnknownQualitySource(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_ordered() {
        assert!(AudioQuality::Low < AudioQuality::High);
        assert!(AudioQuality::High < AudioQuality::Lossless);
        assert!(AudioQuality::Lossless < AudioQuality::HiResLossless);
        assert!(!AudioQuality::High.is_lossless());
        assert!(AudioQuality::HiResLossless.is_lossless());
    }

    #[test]
    fn parse_accepts_wire_names_and_aliases() {
        assert_eq!("LOSSLESS".parse::<AudioQuality>(), Ok(AudioQuality::Lossless));
        assert_eq!("hi-res".parse::<AudioQuality>(), Ok(AudioQuality::HiResLossless));
        assert_eq!(" low ".parse::<AudioQuality>(), Ok(AudioQuality::Low));
        assert_eq!(
            "ultra".parse::<AudioQuality>(),
            Err(CoreError::UnknownQuality("ultra".to_string()))
        );
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&AudioQuality::HiResLossless).unwrap();
        assert_eq!(json, "\"HI_RES_LOSSLESS\"");

        let source: QualitySource = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(source, QualitySource::Auto);
    }

    #[test]
    fn defaults_match_initial_player_state() {
        assert_eq!(AudioQuality::default(), AudioQuality::Lossless);
        assert_eq!(QualitySource::default(), QualitySource::Manual);
    }
}
