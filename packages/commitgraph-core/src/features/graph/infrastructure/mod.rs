/// Commit Graph Infrastructure
pub mod builder;
pub mod error;
pub mod fragment_controller;

pub use builder::*;
pub use error::*;
pub use fragment_controller::*;
