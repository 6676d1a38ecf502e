//! 结构识别：森林、树、分支、树形图
//!
//! 有向图按弱连通处理。空图（没有节点）不满足任何一个谓词。

use super::union_find::UnionFind;
use crate::graph::{Graph, NodeKey};
use std::collections::HashMap;

/// 统计弱连通分量数；出现环（含自环、平行边）时返回 None
fn acyclic_components<N: NodeKey>(graph: &Graph<N>) -> Option<usize> {
    let position: HashMap<&N, usize> = graph
        .nodes()
        .enumerate()
        .map(|(ix, node)| (node, ix))
        .collect();

    let mut uf = UnionFind::with_capacity(position.len());
    let mut components = position.len();
    for edge in graph.edges() {
        let (Some(&u), Some(&v)) = (position.get(edge.src()), position.get(edge.dst())) else {
            continue;
        };
        if !uf.union(u, v) {
            return None;
        }
        components -= 1;
    }
    Some(components)
}

fn max_in_degree_le_one<N: NodeKey>(graph: &Graph<N>) -> bool {
    graph.nodes().all(|node| graph.in_degree(node) <= 1)
}

/// 是否为森林：每个弱连通分量都无环
pub fn is_forest<N: NodeKey>(graph: &Graph<N>) -> bool {
    graph.node_count() > 0 && acyclic_components(graph).is_some()
}

/// 是否为树：无环且弱连通
pub fn is_tree<N: NodeKey>(graph: &Graph<N>) -> bool {
    graph.node_count() > 0 && acyclic_components(graph) == Some(1)
}

/// 是否为分支：有向森林且每个节点入度至多为 1
pub fn is_branching<N: NodeKey>(graph: &Graph<N>) -> bool {
    graph.is_directed() && is_forest(graph) && max_in_degree_le_one(graph)
}

/// 是否为树形图：有向树且每个节点入度至多为 1（恰有一个根）
pub fn is_arborescence<N: NodeKey>(graph: &Graph<N>) -> bool {
    graph.is_directed() && is_tree(graph) && max_in_degree_le_one(graph)
}
