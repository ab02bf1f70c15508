/// Commit Graph Domain Models
pub mod branch;
pub mod edge;
pub mod fragment;
pub mod graph;
pub mod node;
pub mod replace;
pub mod row;

pub use branch::*;
pub use edge::*;
pub use fragment::*;
pub use graph::*;
pub use node::*;
pub use replace::*;
pub use row::*;
