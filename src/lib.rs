//! graphbranch - 有向图最优分支与生成树形图求解库
//!
//! 基于 Edmonds 算法，支持：
//! - 带权有向多重图（平行边、自环、任意节点类型）
//! - 最大/最小分支与最大/最小生成树形图
//! - 贪心分支与结构识别（森林、树、分支、树形图）
//! - CSV 边表导入与命令行批量求解

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{
    branching_weight, greedy_branching, is_arborescence, is_branching, is_forest, is_tree,
    maximum_branching, maximum_spanning_arborescence, minimum_branching,
    minimum_spanning_arborescence, optimum_branching, Edmonds, SolveStats,
};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, NodeKey};
pub use types::{EdgeWeight, Kind, Properties, PropertyValue, Style};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
