//! Domain layer for Church Manager backend.
//!
//! This crate contains:
//! - Domain models for the managed collections (Event, Sermon,
//!   PrayerRequest, GalleryPhoto, Lesson)
//! - The collection binding trait used by the store synchronizer
//! - The pure filter/aggregate engine for derived admin views

pub mod collection;
pub mod filter;
pub mod models;
