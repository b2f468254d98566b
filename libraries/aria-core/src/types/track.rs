//! Track, album and artist types

use super::AudioQuality;
use serde::{Deserialize, Serialize};

/// An artist reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

impl Artist {
    /// Create a new artist reference
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Album metadata carried by a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,

    /// Primary artist, when the catalog provides one
    #[serde(default)]
    pub artist: Option<Artist>,

    /// All credited artists
    #[serde(default)]
    pub artists: Vec<Artist>,

    /// Cover art identifier or URL
    #[serde(default)]
    pub cover: Option<String>,
}

impl Album {
    /// Create an album with no artist or cover metadata
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            artists: Vec::new(),
            cover: None,
        }
    }

    /// Build the album-visit payload, backfilling missing artist fields
    ///
    /// `artist` falls back to `fallback` when the album has none; `artists`
    /// falls back to `[fallback]` when empty. Fields the album already has
    /// are never overwritten.
    pub fn with_artist_fallback(&self, fallback: Option<&Artist>) -> AlbumWithArtist {
        let artist = self.artist.clone().or_else(|| fallback.cloned());
        let artists = if self.artists.is_empty() {
            fallback.cloned().into_iter().collect()
        } else {
            self.artists.clone()
        };

        AlbumWithArtist {
            id: self.id.clone(),
            title: self.title.clone(),
            artist,
            artists,
            cover: self.cover.clone(),
        }
    }
}

/// Album payload forwarded to the album-visit collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumWithArtist {
    pub id: String,
    pub title: String,
    pub artist: Option<Artist>,
    pub artists: Vec<Artist>,
    pub cover: Option<String>,
}

/// A playable track
///
/// The playback engine only reads `id`, `duration`, the album/artist
/// references and the quality hints; everything else is display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable identity, unique within a queue
    pub id: String,

    pub title: String,

    /// Length in seconds
    pub duration: f64,

    #[serde(default)]
    pub artist: Option<Artist>,

    #[serde(default)]
    pub album: Option<Album>,

    /// Highest tier the catalog advertises for this track
    #[serde(default)]
    pub audio_quality: Option<AudioQuality>,

    /// Catalog media tags such as `LOSSLESS` or `HIRES_LOSSLESS`
    #[serde(default)]
    pub media_tags: Vec<String>,

    #[serde(default)]
    pub bit_depth: Option<u8>,

    /// Advertised sample rate in Hz (not the decoder-reported one)
    #[serde(default)]
    pub sample_rate: Option<u32>,
}

impl Track {
    /// Create a track with no album, artist or quality hints
    ///
    /// Negative or non-finite durations are stored as 0.
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: sanitize_seconds(duration),
            artist: None,
            album: None,
            audio_quality: None,
            media_tags: Vec::new(),
            bit_depth: None,
            sample_rate: None,
        }
    }

    #[must_use]
    pub fn with_artist(mut self, artist: Artist) -> Self {
        self.artist = Some(artist);
        self
    }

    #[must_use]
    pub fn with_album(mut self, album: Album) -> Self {
        self.album = Some(album);
        self
    }

    #[must_use]
    pub fn with_audio_quality(mut self, quality: AudioQuality) -> Self {
        self.audio_quality = Some(quality);
        self
    }

    #[must_use]
    pub fn with_media_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.media_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_format(mut self, bit_depth: u8, sample_rate: u32) -> Self {
        self.bit_depth = Some(bit_depth);
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Album-visit payload for this track, if it carries album metadata
    pub fn album_visit(&self) -> Option<AlbumWithArtist> {
        self.album
            .as_ref()
            .map(|album| album.with_artist_fallback(self.artist.as_ref()))
    }

    /// Duration clamped to a finite, non-negative number of seconds
    pub fn duration_secs(&self) -> f64 {
        sanitize_seconds(self.duration)
    }
}

fn sanitize_seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_visit_backfills_missing_artists() {
        let artist = Artist::new("a1", "Nils Frahm");
        let track = Track::new("t1", "Says", 500.0)
            .with_artist(artist.clone())
            .with_album(Album::new("al1", "Spaces"));

        let visit = track.album_visit().unwrap();
        assert_eq!(visit.artist, Some(artist.clone()));
        assert_eq!(visit.artists, vec![artist]);
    }

    #[test]
    fn album_visit_keeps_album_artists() {
        let album_artist = Artist::new("a2", "Various Artists");
        let mut album = Album::new("al2", "Compilation");
        album.artist = Some(album_artist.clone());
        album.artists = vec![album_artist.clone(), Artist::new("a3", "Guest")];

        let track = Track::new("t2", "Opener", 200.0)
            .with_artist(Artist::new("a4", "Track Artist"))
            .with_album(album);

        let visit = track.album_visit().unwrap();
        assert_eq!(visit.artist, Some(album_artist));
        assert_eq!(visit.artists.len(), 2);
        assert_eq!(visit.artists[1].name, "Guest");
    }

    #[test]
    fn album_visit_without_any_artist() {
        let track = Track::new("t3", "Untitled", 60.0).with_album(Album::new("al3", "Demo"));

        let visit = track.album_visit().unwrap();
        assert!(visit.artist.is_none());
        assert!(visit.artists.is_empty());
    }

    #[test]
    fn no_album_no_visit() {
        let track = Track::new("t4", "Single", 180.0).with_artist(Artist::new("a5", "Solo"));
        assert!(track.album_visit().is_none());
    }

    #[test]
    fn invalid_durations_become_zero() {
        assert_eq!(Track::new("t5", "Bad", -3.0).duration, 0.0);
        assert_eq!(Track::new("t6", "Bad", f64::NAN).duration, 0.0);

        let mut track = Track::new("t7", "Patched", 10.0);
        track.duration = f64::INFINITY;
        assert_eq!(track.duration_secs(), 0.0);
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let json = r#"{"id":"99","title":"Bare","duration":42.5}"#;
        let track: Track = serde_json::from_str(json).unwrap();

        assert_eq!(track.id, "99");
        assert!(track.album.is_none());
        assert!(track.media_tags.is_empty());
    }
}
