//! Core conversion types, configuration and errors

pub mod config;
pub mod converter;
pub mod errors;
pub mod models;
