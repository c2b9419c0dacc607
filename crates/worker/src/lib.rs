//! Background worker for the imaging pipeline.
//!
//! Loads the stimulus movie catalog and keeps computed tables such as
//! `mask_coordinates` populated as new segmentation results arrive.

pub mod catalog;
pub mod config;
pub mod runner;
