//! Series Organizer Library
//!
//! Renames TV episodes into a canonical `Series/Season NN/Series SxxEyy.ext`
//! layout, using a local language model to read noisy filenames.

pub mod cli;
pub mod core;
pub mod error;
pub mod generators;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
