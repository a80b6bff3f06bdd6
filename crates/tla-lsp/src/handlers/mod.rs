//! LSP Request and Notification Handlers
//!
//! This module contains handlers for all LSP protocol messages.
//! Each submodule handles a specific category of LSP functionality.
//!
//! # Handler Categories
//!
//! - [`initialize`]: Server initialization
//! - [`shutdown`]: Server shutdown handling
//! - [`document`]: Text document synchronization
//! - [`configuration`]: Live settings updates
//! - [`completion`]: Code completion and item resolution

pub mod completion;
pub mod configuration;
pub mod document;
pub mod initialize;
pub mod shutdown;
