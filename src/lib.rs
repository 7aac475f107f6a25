//! daylog - leveled logging to one file per calendar day
//!
//! This library provides the [`logging::LogWriter`] and its configuration.

mod macros;

pub mod config;
pub mod logging;
