//! Imgforged-Common: Shared types, path rules, and errors.
//!
//! This crate provides functionality used across imgforged:
//!
//! - **Dimensions**: The `WIDTHxHEIGHT` value type used by folder rules
//! - **Path Utilities**: Classification of source images and derived thumbnails
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use imgforged_common::paths::{classify, thumb_name_for, PathClass};
//! use imgforged_common::Dimensions;
//! use std::path::Path;
//!
//! let dims: Dimensions = "640x480".parse().unwrap();
//! assert_eq!(dims.width, 640);
//!
//! assert_eq!(classify(Path::new("photos/cat.jpg")), PathClass::Eligible);
//! assert_eq!(
//!     thumb_name_for(Path::new("photos/cat.jpg")),
//!     Path::new("photos/cat_thumb.jpg")
//! );
//! ```

pub mod error;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
