//! 贪心分支
//!
//! 按边权顺序扫描，构造一个极大（但不一定最优）的分支

use super::union_find::UnionFind;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, NodeKey};
use crate::types::{EdgeWeight, Kind};
use std::collections::HashMap;

/// 求解入口统一的有向性检查
pub(crate) fn ensure_directed<N: NodeKey>(graph: &Graph<N>, operation: &str) -> Result<()> {
    if graph.is_directed() {
        Ok(())
    } else {
        Err(Error::NotImplemented(format!(
            "{} 只适用于有向图，请先调用 to_directed()",
            operation
        )))
    }
}

/// 复制全部节点（含属性）到一个空的有向图
pub(crate) fn empty_like<N: NodeKey>(graph: &Graph<N>) -> Graph<N> {
    let mut out = Graph::directed();
    for (node, data) in graph.node_entries() {
        out.add_node_with_properties(node.clone(), data.properties().clone());
    }
    out
}

/// 分支的总权重
pub fn branching_weight<N: NodeKey>(graph: &Graph<N>, weight: &EdgeWeight) -> f64 {
    graph.weighted_edges(weight).map(|(_, _, w)| w).sum()
}

/// 贪心构造分支
///
/// 候选边按 (权重, 源节点发现序号, 目标节点发现序号) 排序，`Max` 降序、`Min` 升序。
/// 依次接受目标节点尚无入边、且不会与已选边成环的边。权重为 NaN 的边不参与。
pub fn greedy_branching<N: NodeKey>(
    graph: &Graph<N>,
    weight: &EdgeWeight,
    kind: Kind,
) -> Result<Graph<N>> {
    ensure_directed(graph, "greedy_branching")?;

    let position: HashMap<&N, usize> = graph
        .nodes()
        .enumerate()
        .map(|(ix, node)| (node, ix))
        .collect();

    let mut candidates: Vec<(f64, u64, u64, &Edge<N>)> = graph
        .edges()
        .filter(|edge| !edge.weight(weight).is_nan())
        .map(|edge| {
            let src_order = graph.node_order(edge.src()).unwrap_or(u64::MAX);
            let dst_order = graph.node_order(edge.dst()).unwrap_or(u64::MAX);
            (edge.weight(weight), src_order, dst_order, edge)
        })
        .collect();

    candidates.sort_by(|a, b| {
        let ord = a
            .0
            .total_cmp(&b.0)
            .then(a.1.cmp(&b.1))
            .then(a.2.cmp(&b.2));
        match kind {
            Kind::Max => ord.reverse(),
            Kind::Min => ord,
        }
    });

    let mut branching = empty_like(graph);
    let mut uf = UnionFind::with_capacity(position.len());
    let mut has_parent = vec![false; position.len()];

    for (_, _, _, edge) in candidates {
        let (Some(&u), Some(&v)) = (position.get(edge.src()), position.get(edge.dst())) else {
            continue;
        };
        if uf.connected(u, v) || has_parent[v] {
            continue;
        }
        has_parent[v] = true;
        uf.union(u, v);
        branching.add_edge_with_key(
            edge.src().clone(),
            edge.dst().clone(),
            edge.key(),
            weight.annotate(edge.properties()),
        )?;
    }

    Ok(branching)
}
