//! # Ultrawide Common
//!
//! Common types shared by the Ultrawide HUD adaptation crates.
//!
//! This crate provides the foundational types used across the workspace:
//! - Aspect ratio type with tolerant comparison
//! - Screen rectangles for viewport-to-pixel mapping
//! - Marker ID type for scan markers
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod aspect;
pub mod error;
pub mod ids;
pub mod rect;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aspect::*;
    pub use crate::error::*;
    pub use crate::ids::*;
    pub use crate::rect::*;
}

pub use prelude::*;
