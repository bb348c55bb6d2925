// src/lib.rs
pub mod commands;
pub mod config;
pub mod domain;
pub mod messaging;
pub mod persistence;
pub mod scheduler;

pub use domain::*;
