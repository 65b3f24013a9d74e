//! Pokedex catalog TUI with a persistent catch box.
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod effect;
pub mod persist;
pub mod reducer;
pub mod state;
pub mod ui;
