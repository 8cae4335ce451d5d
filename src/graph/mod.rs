mod model;
mod parse;
mod source;

pub use model::{Direction, Graph, GraphLink, GraphNode, MAX_WEIGHT};
pub use source::{GraphSource, load_graph};
