/// Git Reader Domain Models
pub mod commit_data;
pub mod commit_parents;

pub use commit_data::*;
pub use commit_parents::*;
