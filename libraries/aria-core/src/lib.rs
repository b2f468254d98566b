//! Aria Player Core
//!
//! Platform-agnostic domain types shared by the Aria Player crates.
//!
//! This crate provides:
//! - **Domain Types**: `Track`, `Album`, `Artist`, `AlbumWithArtist`
//! - **Quality Types**: `AudioQuality` (ordered) and `QualitySource`
//! - **Quality Derivation**: `derive_quality`, a pure function from codec hints to a quality tier
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use aria_core::{derive_quality, AudioQuality, Track};
//!
//! let track = Track::new("42", "Song", 215.0)
//!     .with_media_tags(["HIRES_LOSSLESS"]);
//!
//! assert_eq!(derive_quality(Some(&track)), Some(AudioQuality::HiResLossless));
//! assert_eq!(derive_quality(None), None);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod quality;
pub mod types;

pub use error::{CoreError, Result};
pub use quality::{derive_quality, resolve_auto_quality};
pub use types::{Album, AlbumWithArtist, Artist, AudioQuality, QualitySource, Track};
