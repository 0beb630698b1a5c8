//! Railtrace Core — domain models, repository traits, and the shared
//! error type for the train/cargo tracking system.

pub mod error;
pub mod models;
pub mod repository;
