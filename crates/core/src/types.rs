/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Optical plane number within a scan. Slices are numbered from 1.
pub type SliceNumber = i32;

/// Identifier of a segmented trace within a slice.
pub type TraceId = i32;
