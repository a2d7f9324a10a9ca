//! Defines the transformation-flow graph between chart sectors.
pub mod edge;
pub mod flow;

pub use edge::{CausalEdge, Transformation};
pub use flow::{self_transformations, FlowGraph};
