//! Stimulus movie catalog loading.
//!
//! Movies are curated by hand in a JSON file: an array of movie entries,
//! each optionally declaring how many clip files it was cut into.
//!
//! ```json
//! [
//!   {
//!     "movie_name": "MadMax01",
//!     "path": "/stimuli/movies/madmax",
//!     "movie_class": "madmax",
//!     "original_file": "fury_road.mkv",
//!     "file_template": "madmax_%03u.avi",
//!     "file_duration": 10.0,
//!     "movie_description": "Chase sequence",
//!     "clip_count": 12
//!   }
//! ]
//! ```
//!
//! Omitted codec, frame rate, frame size, and params take their defaults.
//! Loading is idempotent: existing movies are left untouched and clip rows
//! are upserted, named from the stored movie's own template.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context};
use neuroscan_core::movie::MovieAsset;
use neuroscan_db::models::movie::CreateMovie;
use neuroscan_db::repositories::MovieRepo;
use neuroscan_db::DbPool;
use serde::Deserialize;

/// One movie of the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub asset: MovieAsset,
    /// Number of clip files, numbered from 1.
    #[serde(default)]
    pub clip_count: i32,
}

/// Outcome of loading a catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogReport {
    pub movies_created: usize,
    pub movies_existing: usize,
    pub clips_registered: usize,
}

/// Parse and validate a catalog document.
pub fn parse_catalog(json: &str) -> anyhow::Result<Vec<CatalogEntry>> {
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(json).context("Movie catalog is not valid JSON")?;

    let mut seen = HashSet::new();
    for entry in &entries {
        let name = &entry.asset.movie_name;
        entry
            .asset
            .check()
            .with_context(|| format!("Invalid catalog entry '{name}'"))?;
        if entry.clip_count < 0 {
            bail!("clip_count of '{name}' must not be negative");
        }
        if !seen.insert(name.as_str()) {
            bail!("Movie '{name}' appears more than once in the catalog");
        }
    }
    Ok(entries)
}

/// Insert catalog movies that are not stored yet and register their clips.
pub async fn load_catalog(pool: &DbPool, entries: &[CatalogEntry]) -> anyhow::Result<CatalogReport> {
    let mut report = CatalogReport::default();

    for entry in entries {
        let asset = &entry.asset;
        let movie = match MovieRepo::find_by_name(pool, &asset.movie_name).await? {
            Some(existing) => {
                report.movies_existing += 1;
                existing
            }
            None => {
                let created = MovieRepo::create(pool, &CreateMovie::from(asset))
                    .await
                    .with_context(|| format!("Failed to insert movie '{}'", asset.movie_name))?;
                tracing::info!(movie = %created.movie_name, class = %created.movie_class, "Movie added");
                report.movies_created += 1;
                created
            }
        };

        // Clip names follow the stored template, which may predate this catalog.
        let stored = movie.to_asset()?;
        for clip_number in 1..=entry.clip_count {
            let file_name = stored.clip_file_name(clip_number)?;
            MovieRepo::upsert_clip(pool, movie.id, clip_number, &file_name).await?;
            report.clips_registered += 1;
        }
    }

    Ok(report)
}

/// Read, validate, and load a catalog file.
pub async fn load_catalog_file(pool: &DbPool, path: &Path) -> anyhow::Result<CatalogReport> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read movie catalog {}", path.display()))?;
    let entries = parse_catalog(&json)?;
    let report = load_catalog(pool, &entries).await?;
    tracing::info!(
        path = %path.display(),
        created = report.movies_created,
        existing = report.movies_existing,
        clips = report.clips_registered,
        "Movie catalog loaded"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use neuroscan_core::movie::{MovieClass, DEFAULT_CODEC, DEFAULT_FRAME_RATE};

    use super::*;

    const ENTRY: &str = r#"{
        "movie_name": "Object01",
        "path": "/stimuli/movies/object3d",
        "movie_class": "object3d",
        "original_file": "",
        "file_template": "obj_%02d.avi",
        "file_duration": 5.0,
        "movie_description": "",
        "clip_count": 3
    }"#;

    #[test]
    fn entry_takes_defaults() {
        let entries = parse_catalog(&format!("[{ENTRY}]")).unwrap();
        assert_eq!(entries.len(), 1);
        let asset = &entries[0].asset;
        assert_eq!(asset.movie_class, MovieClass::Object3D);
        assert_eq!(asset.codec, DEFAULT_CODEC);
        assert_eq!(asset.frame_rate, DEFAULT_FRAME_RATE);
        assert_eq!(asset.params, None);
        assert_eq!(entries[0].clip_count, 3);
    }

    #[test]
    fn clip_count_is_optional() {
        let json = ENTRY.replace(r#""clip_count": 3"#, r#""params": {"seed": 4}"#);
        let entries = parse_catalog(&format!("[{json}]")).unwrap();
        assert_eq!(entries[0].clip_count, 0);
        assert_eq!(entries[0].asset.params, Some(serde_json::json!({"seed": 4})));
    }

    #[test]
    fn unknown_class_rejected() {
        let json = ENTRY.replace(r#""movie_class": "object3d""#, r#""movie_class": "vr""#);
        assert!(parse_catalog(&format!("[{json}]")).is_err());
    }

    #[test]
    fn invalid_entries_rejected() {
        let short = ENTRY.replace("Object01", "Obj1");
        assert!(parse_catalog(&format!("[{short}]")).is_err());

        let no_placeholder = ENTRY.replace("obj_%02d.avi", "obj.avi");
        assert!(parse_catalog(&format!("[{no_placeholder}]")).is_err());

        let negative = ENTRY.replace(r#""clip_count": 3"#, r#""clip_count": -1"#);
        assert!(parse_catalog(&format!("[{negative}]")).is_err());
    }

    #[test]
    fn duplicate_names_rejected() {
        assert!(parse_catalog(&format!("[{ENTRY}, {ENTRY}]")).is_err());
    }
}
