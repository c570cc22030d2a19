//! Core business logic modules.

pub mod batch;
pub mod classifier;
pub mod extractor;
pub mod planner;
pub mod prompts;
pub mod renamer;
pub mod scanner;
