//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod mask_coordinate;
pub mod movie;
pub mod scan;
pub mod segmented_mask;
