//! Pokecatalog - browsable creature catalog on tui-dispatch
//!
//! This library exposes the app's modules for testing.

pub mod acquire;
pub mod action;
pub mod client;
pub mod components;
pub mod config;
pub mod derive;
pub mod effect;
pub mod entity;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod reducer;
pub mod state;
