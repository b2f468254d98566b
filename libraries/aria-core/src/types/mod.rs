//! Domain types for Aria Player

mod audio_quality;
mod track;

pub use audio_quality::{AudioQuality, QualitySource};
pub use track::{Album, AlbumWithArtist, Artist, Track};
