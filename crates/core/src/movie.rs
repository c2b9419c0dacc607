//! Reference stimulus movies: class enum, column defaults, validation, and
//! clip file-name rendering.
//!
//! Movies are entered by hand and never touched by automated population.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Regex matching a printf-style integer placeholder such as `%d` or `%03u`.
static CLIP_PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%(0)?([0-9]*)[du]").expect("valid regex"));

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Exact length of a movie name.
pub const MOVIE_NAME_LENGTH: u64 = 8;

/// Default ffmpeg encoding arguments.
pub const DEFAULT_CODEC: &str = "-c:v libx264 -preset slow -crf 5";

/// Default frames per second.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// Default frame width in pixels.
pub const DEFAULT_FRAME_WIDTH: i32 = 256;

/// Default frame height in pixels.
pub const DEFAULT_FRAME_HEIGHT: i32 = 144;

fn default_codec() -> String {
    DEFAULT_CODEC.to_string()
}

fn default_frame_rate() -> f64 {
    DEFAULT_FRAME_RATE
}

fn default_frame_width() -> i32 {
    DEFAULT_FRAME_WIDTH
}

fn default_frame_height() -> i32 {
    DEFAULT_FRAME_HEIGHT
}

// ---------------------------------------------------------------------------
// MovieClass
// ---------------------------------------------------------------------------

/// Source category of a stimulus movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieClass {
    MouseCam,
    Object3D,
    MadMax,
}

impl MovieClass {
    pub const ALL: [MovieClass; 3] = [Self::MouseCam, Self::Object3D, Self::MadMax];

    /// Return the stored string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MouseCam => "mousecam",
            Self::Object3D => "object3d",
            Self::MadMax => "madmax",
        }
    }
}

impl std::str::FromStr for MovieClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mousecam" => Ok(Self::MouseCam),
            "object3d" => Ok(Self::Object3D),
            "madmax" => Ok(Self::MadMax),
            _ => Err(CoreError::Validation(format!(
                "Invalid movie_class: '{s}'. Must be one of: mousecam, object3d, madmax"
            ))),
        }
    }
}

impl std::fmt::Display for MovieClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MovieAsset
// ---------------------------------------------------------------------------

/// A stimulus movie entry with every column resolved.
///
/// Deserializing fills the defaulted columns when they are absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MovieAsset {
    #[validate(length(equal = 8, message = "movie_name must be exactly 8 characters"))]
    pub movie_name: String,
    #[validate(length(min = 1, max = 255))]
    pub path: String,
    pub movie_class: MovieClass,
    #[validate(length(max = 255))]
    pub original_file: String,
    #[validate(length(min = 1, max = 255))]
    pub file_template: String,
    /// Duration of each clip file in seconds; all files share it.
    #[validate(range(exclusive_min = 0.0))]
    pub file_duration: f64,
    #[serde(default = "default_codec")]
    #[validate(length(max = 255))]
    pub codec: String,
    #[validate(length(max = 255))]
    pub movie_description: String,
    #[serde(default = "default_frame_rate")]
    #[validate(range(exclusive_min = 0.0))]
    pub frame_rate: f64,
    #[serde(default = "default_frame_width")]
    #[validate(range(min = 1))]
    pub frame_width: i32,
    #[serde(default = "default_frame_height")]
    #[validate(range(min = 1))]
    pub frame_height: i32,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

impl MovieAsset {
    /// Build an asset with the default codec, frame rate, frame size, and no params.
    pub fn new(
        movie_name: impl Into<String>,
        path: impl Into<String>,
        movie_class: MovieClass,
        file_template: impl Into<String>,
        file_duration: f64,
    ) -> Self {
        Self {
            movie_name: movie_name.into(),
            path: path.into(),
            movie_class,
            original_file: String::new(),
            file_template: file_template.into(),
            file_duration,
            codec: default_codec(),
            movie_description: String::new(),
            frame_rate: DEFAULT_FRAME_RATE,
            frame_width: DEFAULT_FRAME_WIDTH,
            frame_height: DEFAULT_FRAME_HEIGHT,
            params: None,
        }
    }

    /// Run field validation plus the file-template check.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        validate_file_template(&self.file_template)
    }

    /// File name of a clip of this movie.
    pub fn clip_file_name(&self, clip_number: i32) -> Result<String, CoreError> {
        render_file_template(&self.file_template, clip_number)
    }

    /// Start of a clip within the whole movie, in seconds.
    pub fn clip_start_secs(&self, clip_number: i32) -> Result<f64, CoreError> {
        validate_clip_number(clip_number)?;
        Ok(f64::from(clip_number - 1) * self.file_duration)
    }
}

// ---------------------------------------------------------------------------
// File templates
// ---------------------------------------------------------------------------

/// Validate a movie name length without building a full asset.
pub fn validate_movie_name(name: &str) -> Result<(), CoreError> {
    let len = name.chars().count() as u64;
    if len != MOVIE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "movie_name must be exactly {MOVIE_NAME_LENGTH} characters (got '{name}', {len})"
        )));
    }
    Ok(())
}

/// A template must contain exactly one integer placeholder.
pub fn validate_file_template(template: &str) -> Result<(), CoreError> {
    let count = CLIP_PLACEHOLDER_RE.find_iter(template).count();
    if count != 1 {
        return Err(CoreError::Validation(format!(
            "file_template must contain exactly one clip number placeholder such as %03d (found {count} in '{template}')"
        )));
    }
    Ok(())
}

fn validate_clip_number(clip_number: i32) -> Result<(), CoreError> {
    if clip_number < 1 {
        return Err(CoreError::Validation(format!(
            "clip_number must be at least 1 (got {clip_number})"
        )));
    }
    Ok(())
}

/// Substitute a clip number into a file template, honoring printf width and
/// zero-padding flags (`%d`, `%4d`, `%03u`).
pub fn render_file_template(template: &str, clip_number: i32) -> Result<String, CoreError> {
    validate_file_template(template)?;
    validate_clip_number(clip_number)?;

    let rendered = CLIP_PLACEHOLDER_RE.replace(template, |caps: &regex::Captures<'_>| {
        let width: usize = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        if caps.get(1).is_some() {
            format!("{clip_number:0width$}")
        } else {
            format!("{clip_number:>width$}")
        }
    });
    Ok(rendered.into_owned())
}
