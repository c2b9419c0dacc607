//! Domain logic for the imaging pipeline.
//!
//! Everything here is pure: no database or file access. The `db` crate
//! stores what these types describe and the `pipeline` crate feeds them.

pub mod centroid;
pub mod coordinates;
pub mod error;
pub mod geometry;
pub mod movie;
pub mod timestamps;
pub mod types;
