//! Transit Tracking Library
//!
//! A live bus-tracking core that can run independently or with a Bevy map view.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
