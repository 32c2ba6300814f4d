//! Utility helpers shared by services, handlers and the admin CLI.
//!
//! - [`slug`] - Random short link slug generation
//! - [`password`] - Salted password hashing
//! - [`token`] - Auth token generation and hashing
//! - [`image`] - Base64 data URL validation for recipe images and avatars

pub mod image;
pub mod password;
pub mod slug;
pub mod token;
