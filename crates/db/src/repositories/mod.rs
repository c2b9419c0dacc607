//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod mask_coordinate_repo;
pub mod movie_repo;
pub mod scan_repo;
pub mod segmented_mask_repo;

pub use mask_coordinate_repo::MaskCoordinateRepo;
pub use movie_repo::MovieRepo;
pub use scan_repo::ScanRepo;
pub use segmented_mask_repo::SegmentedMaskRepo;
