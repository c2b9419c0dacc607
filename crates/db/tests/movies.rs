//! Integration tests for the stimulus movie lookup table.
//!
//! - Column defaults (codec, frame rate, frame size, params)
//! - Movie class domain enforced by the lookup table
//! - Name length check
//! - Update, clips, cascade delete

use assert_matches::assert_matches;
use neuroscan_core::movie::{
    MovieAsset, MovieClass, DEFAULT_CODEC, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_RATE,
    DEFAULT_FRAME_WIDTH,
};
use neuroscan_db::models::movie::{CreateMovie, UpdateMovie};
use neuroscan_db::repositories::MovieRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_movie(name: &str, class: &str) -> CreateMovie {
    CreateMovie {
        movie_name: name.to_string(),
        path: "/stimuli/movies".to_string(),
        movie_class: class.to_string(),
        original_file: None,
        file_template: "clip_%03d.avi".to_string(),
        file_duration: 10.0,
        codec: None,
        movie_description: None,
        frame_rate: None,
        frame_width: None,
        frame_height: None,
        params: None,
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

fn is_check_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23514"))
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_applies_defaults(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap();

    assert_eq!(movie.codec, DEFAULT_CODEC);
    assert_eq!(movie.frame_rate, DEFAULT_FRAME_RATE);
    assert_eq!(movie.frame_width, DEFAULT_FRAME_WIDTH);
    assert_eq!(movie.frame_height, DEFAULT_FRAME_HEIGHT);
    assert_eq!(movie.original_file, "");
    assert!(movie.params.is_none());
    assert_eq!(movie.class().unwrap(), MovieClass::MadMax);
}

/// The table itself carries the same defaults as the domain constants.
#[sqlx::test(migrations = "../../db/migrations")]
async fn table_defaults_match_domain_constants(pool: PgPool) {
    sqlx::query(
        "INSERT INTO movies (movie_name, path, movie_class, file_template, file_duration)
         VALUES ('object01', '/stimuli/obj', 'object3d', 'obj_%d.avi', 5.0)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let movie = MovieRepo::find_by_name(&pool, "object01")
        .await
        .unwrap()
        .expect("movie should exist");
    assert_eq!(movie.codec, DEFAULT_CODEC);
    assert_eq!(movie.frame_rate, DEFAULT_FRAME_RATE);
    assert_eq!((movie.frame_width, movie.frame_height), (256, 144));
    assert!(movie.params.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn asset_round_trips_through_table(pool: PgPool) {
    let mut asset = MovieAsset::new(
        "mcam0001",
        "/stimuli/mousecam",
        MovieClass::MouseCam,
        "mousecam_%03u.mp4",
        15.0,
    );
    asset.params = Some(serde_json::json!({ "gain": 1.5 }));
    asset.check().unwrap();

    let movie = MovieRepo::create(&pool, &CreateMovie::from(&asset))
        .await
        .unwrap();
    assert_eq!(movie.to_asset().unwrap(), asset);
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_movie_class_rejected(pool: PgPool) {
    let err = MovieRepo::create(&pool, &new_movie("virtual1", "vr"))
        .await
        .unwrap_err();
    assert!(is_foreign_key_violation(&err), "expected FK violation, got {err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_length_name_rejected(pool: PgPool) {
    let err = MovieRepo::create(&pool, &new_movie("short", "madmax"))
        .await
        .unwrap_err();
    assert!(is_check_violation(&err), "expected CHECK violation, got {err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn long_name_and_path_rejected(pool: PgPool) {
    let err = MovieRepo::create(&pool, &new_movie("MadMax001", "madmax"))
        .await
        .unwrap_err();
    assert!(is_check_violation(&err), "expected CHECK violation, got {err}");

    let mut movie = new_movie("MadMax01", "madmax");
    movie.path = "p".repeat(256);
    let err = MovieRepo::create(&pool, &movie).await.unwrap_err();
    assert!(is_check_violation(&err), "expected CHECK violation, got {err}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn movie_class_in_use_cannot_be_deleted(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap();
    let err = sqlx::query("DELETE FROM movie_classes WHERE name = 'madmax'")
        .execute(&pool)
        .await
        .unwrap_err();
    let code = match &err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    };
    assert!(
        matches!(code.as_deref(), Some("23503" | "23001")),
        "expected FK restrict violation, got {err}"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_name_rejected(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap();
    let err = MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(_));
}

// ---------------------------------------------------------------------------
// Update / list / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_only_given_fields(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap();

    let update = UpdateMovie {
        frame_rate: Some(60.0),
        movie_description: Some("Mad Max: Fury Road".to_string()),
        ..Default::default()
    };
    let updated = MovieRepo::update(&pool, movie.id, &update)
        .await
        .unwrap()
        .expect("movie should exist");

    assert_eq!(updated.frame_rate, 60.0);
    assert_eq!(updated.movie_description, "Mad Max: Fury Road");
    assert_eq!(updated.codec, DEFAULT_CODEC);
    assert_eq!(updated.path, movie.path);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_to_unknown_class_rejected(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap();
    let update = UpdateMovie {
        movie_class: Some("vr".to_string()),
        ..Default::default()
    };
    let err = MovieRepo::update(&pool, movie.id, &update).await.unwrap_err();
    assert!(is_foreign_key_violation(&err));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_class_filters(pool: PgPool) {
    MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap();
    MovieRepo::create(&pool, &new_movie("MadMax02", "madmax"))
        .await
        .unwrap();
    MovieRepo::create(&pool, &new_movie("object01", "object3d"))
        .await
        .unwrap();

    let madmax = MovieRepo::list_by_class(&pool, "madmax").await.unwrap();
    assert_eq!(madmax.len(), 2);
    assert_eq!(MovieRepo::list_all(&pool).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn clips_follow_template_and_cascade(pool: PgPool) {
    let movie = MovieRepo::create(&pool, &new_movie("MadMax01", "madmax"))
        .await
        .unwrap();
    let asset = movie.to_asset().unwrap();

    for clip in 1..=3 {
        let file_name = asset.clip_file_name(clip).unwrap();
        MovieRepo::upsert_clip(&pool, movie.id, clip, &file_name)
            .await
            .unwrap();
    }
    // Re-upserting renames instead of duplicating.
    MovieRepo::upsert_clip(&pool, movie.id, 2, "renamed.avi")
        .await
        .unwrap();

    let clips = MovieRepo::list_clips(&pool, movie.id).await.unwrap();
    let names: Vec<_> = clips.iter().map(|c| c.file_name.as_str()).collect();
    assert_eq!(names, vec!["clip_001.avi", "renamed.avi", "clip_003.avi"]);

    assert!(MovieRepo::delete(&pool, movie.id).await.unwrap());
    assert!(MovieRepo::list_clips(&pool, movie.id).await.unwrap().is_empty());
    assert!(MovieRepo::find_by_id(&pool, movie.id).await.unwrap().is_none());
}
