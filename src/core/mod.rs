//! Core Apertium client module

pub mod client;
pub mod config;
pub mod decode;
pub mod errors;
pub mod models;
pub mod params;
pub mod text;
