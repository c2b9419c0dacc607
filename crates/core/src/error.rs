use crate::types::{SliceNumber, TraceId};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Mask for trace {trace_id} has zero total weight; centroid is undefined")]
    DegenerateMask { trace_id: TraceId },

    #[error("Slice {slice} has no z offset in scanner metadata ({available} slices recorded)")]
    MissingSlice {
        slice: SliceNumber,
        available: usize,
    },

    #[error("Too many bad camera timestamps: {count}")]
    BadTimestamps { count: usize },
}
