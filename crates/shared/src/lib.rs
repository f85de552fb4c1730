//! Shared utilities and common types for Church Manager backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Field validation logic shared by the admin edit forms
//! - Password hashing with Argon2id for the admin login
//! - Session token signing and verification
//! - Request-signing digests for the media upload host

pub mod crypto;
pub mod password;
pub mod token;
pub mod validation;
