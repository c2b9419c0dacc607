//! Stimulus movie models and DTOs.

use neuroscan_core::error::CoreError;
use neuroscan_core::movie::{MovieAsset, MovieClass};
use neuroscan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub movie_name: String,
    pub path: String,
    pub movie_class: String,
    pub original_file: String,
    pub file_template: String,
    pub file_duration: f64,
    pub codec: String,
    pub movie_description: String,
    pub frame_rate: f64,
    pub frame_width: i32,
    pub frame_height: i32,
    pub params: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Movie {
    pub fn class(&self) -> Result<MovieClass, CoreError> {
        self.movie_class.parse()
    }

    /// Convert the stored row back into a domain asset.
    pub fn to_asset(&self) -> Result<MovieAsset, CoreError> {
        Ok(MovieAsset {
            movie_name: self.movie_name.clone(),
            path: self.path.clone(),
            movie_class: self.class()?,
            original_file: self.original_file.clone(),
            file_template: self.file_template.clone(),
            file_duration: self.file_duration,
            codec: self.codec.clone(),
            movie_description: self.movie_description.clone(),
            frame_rate: self.frame_rate,
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            params: self.params.clone(),
        })
    }
}

/// DTO for creating a movie. `None` fields take the table defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMovie {
    pub movie_name: String,
    pub path: String,
    pub movie_class: String,
    pub original_file: Option<String>,
    pub file_template: String,
    pub file_duration: f64,
    pub codec: Option<String>,
    pub movie_description: Option<String>,
    pub frame_rate: Option<f64>,
    pub frame_width: Option<i32>,
    pub frame_height: Option<i32>,
    pub params: Option<serde_json::Value>,
}

impl From<&MovieAsset> for CreateMovie {
    fn from(asset: &MovieAsset) -> Self {
        Self {
            movie_name: asset.movie_name.clone(),
            path: asset.path.clone(),
            movie_class: asset.movie_class.as_str().to_string(),
            original_file: Some(asset.original_file.clone()),
            file_template: asset.file_template.clone(),
            file_duration: asset.file_duration,
            codec: Some(asset.codec.clone()),
            movie_description: Some(asset.movie_description.clone()),
            frame_rate: Some(asset.frame_rate),
            frame_width: Some(asset.frame_width),
            frame_height: Some(asset.frame_height),
            params: asset.params.clone(),
        }
    }
}

/// DTO for updating a movie. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovie {
    pub path: Option<String>,
    pub movie_class: Option<String>,
    pub original_file: Option<String>,
    pub file_template: Option<String>,
    pub file_duration: Option<f64>,
    pub codec: Option<String>,
    pub movie_description: Option<String>,
    pub frame_rate: Option<f64>,
    pub frame_width: Option<i32>,
    pub frame_height: Option<i32>,
    pub params: Option<serde_json::Value>,
}

/// A row from the `movie_clips` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieClip {
    pub id: DbId,
    pub movie_id: DbId,
    pub clip_number: i32,
    pub file_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `movie_classes` lookup table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieClassRow {
    pub id: i16,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
