//! Ultrawide Engine - host side of the HUD aspect adaptation.
//!
//! This crate provides the pieces around the kernel: the settings file, an
//! in-memory host implementing every capability trait, and a fixed-step
//! session runner that drives the engine through window changes.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod session;
pub mod sim;
pub mod timing;


pub use config::{SettingsError, SettingsResult, SettingsStore};
pub use session::{AppliedChange, ResizeEvent, Session, SessionScript};
pub use sim::SimHost;
