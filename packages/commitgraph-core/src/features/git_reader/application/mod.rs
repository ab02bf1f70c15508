pub mod history_loader;

pub use history_loader::*;
