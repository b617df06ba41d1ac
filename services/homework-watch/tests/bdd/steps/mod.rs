//! BDD step definitions for homework watch

pub mod config_steps;
pub mod translation_steps;
