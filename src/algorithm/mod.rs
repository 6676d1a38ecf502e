//! 图算法模块
//!
//! 包含贪心分支、Edmonds 最优分支/生成树形图以及结构识别

mod arborescence;
mod edmonds;
mod greedy;
mod recognition;
mod union_find;

#[cfg(test)]
mod test_support;

pub use arborescence::{
    maximum_branching, maximum_spanning_arborescence, minimum_branching,
    minimum_spanning_arborescence, optimum_branching, optimum_branching_with_stats,
};
pub use edmonds::{Edmonds, SolveStats};
pub use greedy::{branching_weight, greedy_branching};
pub use recognition::{is_arborescence, is_branching, is_forest, is_tree};
pub use union_find::UnionFind;
