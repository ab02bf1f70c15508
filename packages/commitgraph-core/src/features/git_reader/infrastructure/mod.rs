/// Git Reader Infrastructure
pub mod commit_data_reader;
pub mod commit_parents_reader;
pub mod error;
pub mod parser;
pub mod process;
pub mod runner;

pub use commit_data_reader::*;
pub use commit_parents_reader::*;
pub use error::*;
pub use parser::*;
pub use process::*;
pub use runner::*;
