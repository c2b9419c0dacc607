//! Repository for the `movies`, `movie_clips`, and `movie_classes` tables.

use neuroscan_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{CreateMovie, Movie, MovieClassRow, MovieClip, UpdateMovie};

const COLUMNS: &str = "id, movie_name, path, movie_class, original_file, file_template, \
     file_duration, codec, movie_description, frame_rate, frame_width, frame_height, \
     params, created_at, updated_at";

const CLIP_COLUMNS: &str = "id, movie_id, clip_number, file_name, created_at, updated_at";

/// Provides CRUD operations for stimulus movies and their clips.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a new movie, returning the created row.
    ///
    /// `None` fields fall back to the column defaults: empty original file
    /// and description, `-c:v libx264 -preset slow -crf 5`, 30 fps, 256x144.
    /// A `movie_class` outside the `movie_classes` lookup is a foreign key
    /// violation.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies \
                (movie_name, path, movie_class, original_file, file_template, file_duration, \
                 codec, movie_description, frame_rate, frame_width, frame_height, params) \
             VALUES ($1, $2, $3, COALESCE($4, ''), $5, $6, \
                 COALESCE($7, '-c:v libx264 -preset slow -crf 5'), COALESCE($8, ''), \
                 COALESCE($9, 30), COALESCE($10, 256), COALESCE($11, 144), $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(&input.movie_name)
            .bind(&input.path)
            .bind(&input.movie_class)
            .bind(&input.original_file)
            .bind(&input.file_template)
            .bind(input.file_duration)
            .bind(&input.codec)
            .bind(&input.movie_description)
            .bind(input.frame_rate)
            .bind(input.frame_width)
            .bind(input.frame_height)
            .bind(&input.params)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by its 8-character name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE movie_name = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all movies, ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY movie_name ASC");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    /// List the movies of one class, ordered by name.
    pub async fn list_by_class(
        pool: &PgPool,
        movie_class: &str,
    ) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM movies WHERE movie_class = $1 ORDER BY movie_name ASC"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(movie_class)
            .fetch_all(pool)
            .await
    }

    /// Update a movie. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies SET \
                path = COALESCE($2, path), \
                movie_class = COALESCE($3, movie_class), \
                original_file = COALESCE($4, original_file), \
                file_template = COALESCE($5, file_template), \
                file_duration = COALESCE($6, file_duration), \
                codec = COALESCE($7, codec), \
                movie_description = COALESCE($8, movie_description), \
                frame_rate = COALESCE($9, frame_rate), \
                frame_width = COALESCE($10, frame_width), \
                frame_height = COALESCE($11, frame_height), \
                params = COALESCE($12, params) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.path)
            .bind(&input.movie_class)
            .bind(&input.original_file)
            .bind(&input.file_template)
            .bind(input.file_duration)
            .bind(&input.codec)
            .bind(&input.movie_description)
            .bind(input.frame_rate)
            .bind(input.frame_width)
            .bind(input.frame_height)
            .bind(&input.params)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a movie and its clips. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert or rename one clip of a movie.
    pub async fn upsert_clip(
        pool: &PgPool,
        movie_id: DbId,
        clip_number: i32,
        file_name: &str,
    ) -> Result<MovieClip, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_clips (movie_id, clip_number, file_name) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (movie_id, clip_number) \
             DO UPDATE SET file_name = EXCLUDED.file_name \
             RETURNING {CLIP_COLUMNS}"
        );
        sqlx::query_as::<_, MovieClip>(&query)
            .bind(movie_id)
            .bind(clip_number)
            .bind(file_name)
            .fetch_one(pool)
            .await
    }

    /// All clips of a movie in clip order.
    pub async fn list_clips(pool: &PgPool, movie_id: DbId) -> Result<Vec<MovieClip>, sqlx::Error> {
        let query = format!(
            "SELECT {CLIP_COLUMNS} FROM movie_clips WHERE movie_id = $1 ORDER BY clip_number ASC"
        );
        sqlx::query_as::<_, MovieClip>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// The movie class lookup table, ordered by ID.
    pub async fn list_classes(pool: &PgPool) -> Result<Vec<MovieClassRow>, sqlx::Error> {
        sqlx::query_as::<_, MovieClassRow>(
            "SELECT id, name, created_at, updated_at FROM movie_classes ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
