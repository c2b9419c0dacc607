use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    neuroscan_db::health_check(&pool).await.unwrap();

    let tables = [
        "scans",
        "segmented_masks",
        "mask_coordinates",
        "movies",
        "movie_clips",
        "movie_classes",
    ];

    for table in tables {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM information_schema.tables
                 WHERE table_schema = 'public' AND table_name::text = $1
             )",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap_or_else(|e| panic!("{table} lookup failed: {e}"));
        assert!(exists.0, "{table} should exist after migrations");
    }
}

/// The movie class lookup table is seeded with exactly the three classes.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_movie_classes_seeded(pool: PgPool) {
    let classes = neuroscan_db::repositories::MovieRepo::list_classes(&pool)
        .await
        .unwrap();
    let names: Vec<_> = classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["mousecam", "object3d", "madmax"]);
}
