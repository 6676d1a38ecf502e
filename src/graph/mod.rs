//! 图核心模块
//!
//! 定义节点、边和多重图的核心数据结构

mod edge;
mod graph;
mod index;
mod node;

pub use edge::{Edge, EdgeId};
pub use graph::Graph;
pub use index::AdjacencyIndex;
pub use node::{NodeData, NodeKey};
