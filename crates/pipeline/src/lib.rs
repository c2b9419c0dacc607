//! Population of computed tables.
//!
//! - [`Populate`] is the contract every computed table implements: list the
//!   upstream keys still missing output, compute one key, write one key.
//! - [`populate`] drives a routine across its pending keys.
//! - [`MaskCoordinates`] places segmented cells in micrometers.
//! - [`scanner`] reads per-slice z offsets from scanner metadata files.

pub mod error;
pub mod mask_coordinates;
pub mod populate;
pub mod scanner;

pub use error::PipelineError;
pub use mask_coordinates::MaskCoordinates;
pub use populate::{populate, populate_key, KeyFailure, Populate, PopulateOptions, PopulateReport};
pub use scanner::{JsonHeaderReader, ScanMetadata, ScanMetadataReader};
