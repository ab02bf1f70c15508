pub mod graph_model;

pub use graph_model::*;
