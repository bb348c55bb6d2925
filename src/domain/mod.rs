// src/domain/mod.rs
pub mod auction;
pub mod core;
pub mod resolve;

pub use self::auction::*;
pub use self::core::*;
pub use self::resolve::*;
