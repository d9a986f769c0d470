//! Gift and activity suggestion wizard backed by Gemini.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod form;
pub mod image;
pub mod log;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod ux;
pub mod wire;
pub mod wizard;
