//! Quality derivation from track codec hints

use crate::types::{AudioQuality, Track};

/// Highest sample rate still delivered as plain `Lossless`
const CD_MAX_SAMPLE_RATE: u32 = 48_000;

/// Bit depth delivered as plain `Lossless`
const CD_BIT_DEPTH: u8 = 16;

/// Derive the quality tier a track should stream at
///
/// Checks, in order: hi-res media tags, a hi-res bit depth or sample rate,
/// lossless media tags, the catalog's advertised quality, and a CD bit depth.
/// Returns `None` when there is no track or the hints are inconclusive.
pub fn derive_quality(track: Option<&Track>) -> Option<AudioQuality> {
    let track = track?;

    let has_tag = |wanted: &[&str]| {
        track
            .media_tags
            .iter()
            .any(|tag| wanted.iter().any(|w| tag.eq_ignore_ascii_case(w)))
    };

    if has_tag(&["HIRES_LOSSLESS", "HI_RES_LOSSLESS", "HI_RES"]) {
        return Some(AudioQuality::HiResLossless);
    }

    let hi_res_depth = track.bit_depth.is_some_and(|bits| bits > CD_BIT_DEPTH);
    let hi_res_rate = track.sample_rate.is_some_and(|hz| hz > CD_MAX_SAMPLE_RATE);
    if hi_res_depth || hi_res_rate {
        return Some(AudioQuality::HiResLossless);
    }

    if has_tag(&["LOSSLESS"]) {
        return Some(AudioQuality::Lossless);
    }

    if let Some(quality) = track.audio_quality {
        return Some(quality);
    }

    if track.bit_depth == Some(CD_BIT_DEPTH) {
        return Some(AudioQuality::Lossless);
    }

    None
}

/// Quality used by auto mode: the derived tier, or `Lossless` when inconclusive
pub fn resolve_auto_quality(track: Option<&Track>) -> AudioQuality {
    derive_quality(track).unwrap_or(AudioQuality::Lossless)
}
