//! 算法测试共用的图构造与比较工具

use crate::graph::Graph;
use crate::types::EdgeWeight;

/// Edmonds 论文中的 9 节点示例（邻接矩阵，0 表示无边）
pub const EDMONDS_MATRIX: [[i64; 9]; 9] = [
    [0, 0, 12, 0, 12, 0, 0, 0, 0],
    [4, 0, 0, 0, 0, 13, 0, 0, 0],
    [0, 17, 0, 21, 0, 12, 0, 0, 0],
    [5, 0, 0, 0, 17, 0, 18, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 12, 0],
    [0, 0, 0, 0, 0, 0, 14, 0, 12],
    [0, 0, 21, 0, 0, 0, 0, 0, 15],
    [0, 0, 0, 19, 0, 0, 15, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 18, 0],
];

/// 由示例矩阵构造有向多重图，每条边的权重加上 `shift`
pub fn edmonds_graph(shift: f64) -> Graph<i64> {
    matrix_graph(|w| w as f64 + shift)
}

/// 由示例矩阵构造有向多重图，权重经 `f` 变换
pub fn matrix_graph(f: impl Fn(i64) -> f64) -> Graph<i64> {
    let mut graph = Graph::directed();
    for node in 0..9 {
        graph.add_node(node);
    }
    for (u, row) in EDMONDS_MATRIX.iter().enumerate() {
        for (v, &w) in row.iter().enumerate() {
            if w != 0 {
                graph.add_weighted_edge(u as i64, v as i64, f(w));
            }
        }
    }
    graph
}

/// 由 (u, v, w) 列表构造有向图
pub fn build_graph(edges: &[(i64, i64, i64)]) -> Graph<i64> {
    let mut graph = Graph::directed();
    for &(u, v, w) in edges {
        graph.add_weighted_edge(u, v, w as f64);
    }
    graph
}

/// 取出全部边的 (u, v, w)，排序后便于比较
pub fn edge_triples(graph: &Graph<i64>) -> Vec<(i64, i64, i64)> {
    let weight = EdgeWeight::default();
    let mut edges: Vec<(i64, i64, i64)> = graph
        .edges()
        .map(|e| (*e.src(), *e.dst(), e.weight(&weight).round() as i64))
        .collect();
    edges.sort_unstable();
    edges
}

/// 排序后的期望边列表
pub fn triples(edges: &[(i64, i64, i64)]) -> Vec<(i64, i64, i64)> {
    let mut edges = edges.to_vec();
    edges.sort_unstable();
    edges
}
