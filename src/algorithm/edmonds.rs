//! Edmonds 最优分支算法
//!
//! 逐个节点选取权重最大的入边；一旦选中的边闭合成环，就把环收缩成
//! 一个超级节点并重写边权，然后在收缩后的图上继续。所有节点处理完后，
//! 按收缩记录逆序展开，得到原图上的最优分支或生成树形图。
//!
//! 收缩过程不递归：每一轮留下一张回溯表，展开时用一个显式栈逆序处理。

use super::greedy::{empty_like, ensure_directed};
use super::union_find::UnionFind;
use crate::error::Result;
use crate::graph::{Edge, Graph, NodeKey};
use crate::types::{EdgeWeight, Kind, Style};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// 工作图节点下标：原节点占 0..n，超级节点依次追加
type NodeIx = usize;

/// 边键：原图边的枚举序号，收缩前后不变
type EdgeKey = usize;

#[derive(Debug, Clone, Copy)]
struct WorkEdge {
    src: NodeIx,
    dst: NodeIx,
    weight: f64,
}

/// 收缩过程中使用的工作图
///
/// 节点、后继与前驱都保持插入顺序，权重相同时据此决定取舍。
#[derive(Debug, Default)]
struct WorkGraph {
    nodes: IndexSet<NodeIx>,
    succ: HashMap<NodeIx, IndexMap<NodeIx, Vec<EdgeKey>>>,
    pred: HashMap<NodeIx, IndexMap<NodeIx, Vec<EdgeKey>>>,
    edges: HashMap<EdgeKey, WorkEdge>,
}

impl WorkGraph {
    fn add_node(&mut self, node: NodeIx) {
        if self.nodes.insert(node) {
            self.succ.insert(node, IndexMap::new());
            self.pred.insert(node, IndexMap::new());
        }
    }

    fn add_edge(&mut self, key: EdgeKey, edge: WorkEdge) {
        self.add_node(edge.src);
        self.add_node(edge.dst);
        self.succ
            .entry(edge.src)
            .or_default()
            .entry(edge.dst)
            .or_default()
            .push(key);
        self.pred
            .entry(edge.dst)
            .or_default()
            .entry(edge.src)
            .or_default()
            .push(key);
        self.edges.insert(key, edge);
    }

    fn remove_node(&mut self, node: NodeIx) {
        if !self.nodes.shift_remove(&node) {
            return;
        }
        if let Some(out) = self.succ.remove(&node) {
            for (dst, keys) in out {
                for key in keys {
                    self.edges.remove(&key);
                }
                if let Some(pred) = self.pred.get_mut(&dst) {
                    pred.shift_remove(&node);
                }
            }
        }
        if let Some(inc) = self.pred.remove(&node) {
            for (src, keys) in inc {
                for key in keys {
                    self.edges.remove(&key);
                }
                if let Some(succ) = self.succ.get_mut(&src) {
                    succ.shift_remove(&node);
                }
            }
        }
    }

    fn edge(&self, key: EdgeKey) -> Option<&WorkEdge> {
        self.edges.get(&key)
    }

    fn node_list(&self) -> Vec<NodeIx> {
        self.nodes.iter().copied().collect()
    }

    /// 指向 `node` 的最重入边，权重相同取先遇到的
    fn heaviest_in_edge(&self, node: NodeIx) -> Option<(EdgeKey, WorkEdge)> {
        let mut best = None;
        let mut best_weight = f64::NEG_INFINITY;
        for keys in self.pred.get(&node)?.values() {
            for key in keys {
                if let Some(&edge) = self.edges.get(key) {
                    if edge.weight > best_weight {
                        best_weight = edge.weight;
                        best = Some((*key, edge));
                    }
                }
            }
        }
        best
    }

    /// 按 (源节点, 目标节点, 键) 的插入顺序列出全部边
    fn edges_in_order(&self) -> Vec<(EdgeKey, WorkEdge)> {
        let mut out = Vec::with_capacity(self.edges.len());
        for node in &self.nodes {
            let Some(succ) = self.succ.get(node) else {
                continue;
            };
            for keys in succ.values() {
                for key in keys {
                    if let Some(&edge) = self.edges.get(key) {
                        out.push((*key, edge));
                    }
                }
            }
        }
        out
    }
}

/// 节点当前选中的入边
#[derive(Debug, Clone, Copy)]
struct Selected {
    key: EdgeKey,
    src: NodeIx,
}

/// 选中的边闭合出的环：节点从环根开始，边按路径顺序，闭合边在最后
#[derive(Debug)]
struct Cycle {
    nodes: Vec<NodeIx>,
    edges: Vec<EdgeKey>,
}

/// 一轮收缩的回溯表
#[derive(Debug)]
struct Contraction {
    super_node: NodeIx,
    /// 环上的边及其在本轮中的目标节点
    circuit: Vec<(EdgeKey, NodeIx)>,
    /// 环上权重最小的边
    min_edge: EdgeKey,
    /// 进入环的边 -> 本轮中它原本指向的环上节点
    entering: IndexMap<EdgeKey, NodeIx>,
}

struct Solver {
    graph: WorkGraph,
    style: Style,
    next_node: NodeIx,
    selected: HashMap<NodeIx, Selected>,
    visited: HashSet<NodeIx>,
    uf: UnionFind,
    rounds: Vec<Contraction>,
}

impl Solver {
    fn new(graph: WorkGraph, style: Style, node_count: usize) -> Self {
        Self {
            graph,
            style,
            next_node: node_count,
            selected: HashMap::new(),
            visited: HashSet::new(),
            uf: UnionFind::with_capacity(node_count),
            rounds: Vec::new(),
        }
    }

    /// 返回原图上选中的边键以及收缩轮数
    fn run(mut self) -> (HashSet<EdgeKey>, usize) {
        let mut order = self.graph.node_list();
        let mut cursor = 0;

        while cursor < order.len() {
            let node = order[cursor];
            cursor += 1;
            if !self.visited.insert(node) {
                continue;
            }

            let Some((key, edge)) = self.graph.heaviest_in_edge(node) else {
                continue;
            };

            // 源与目标已在同一棵树里：node 是该树的根，加入此边会闭合成环
            let cycle = if self.uf.connected(edge.src, node) {
                Some(self.close_cycle(node, edge.src, key))
            } else {
                None
            };

            // 分支不必覆盖所有节点，非正权边只会拉低总权重
            if self.style == Style::Branching && edge.weight <= 0.0 {
                continue;
            }

            trace!(node, src = edge.src, key, weight = edge.weight, "选中入边");
            self.selected.insert(node, Selected { key, src: edge.src });
            self.uf.union(edge.src, node);

            if let Some(cycle) = cycle {
                self.contract(cycle);
                order = self.graph.node_list();
                cursor = 0;
            }
        }

        let contractions = self.rounds.len();
        (self.expand(), contractions)
    }

    fn close_cycle(&self, root: NodeIx, tail: NodeIx, closing: EdgeKey) -> Cycle {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let mut current = tail;
        while current != root {
            let Some(sel) = self.selected.get(&current) else {
                break;
            };
            nodes.push(current);
            edges.push(sel.key);
            current = sel.src;
        }
        nodes.push(root);
        nodes.reverse();
        edges.reverse();
        edges.push(closing);
        Cycle { nodes, edges }
    }

    fn contract(&mut self, cycle: Cycle) {
        let mut incoming_weight: HashMap<NodeIx, f64> = HashMap::new();
        let mut circuit = Vec::with_capacity(cycle.edges.len());
        let mut min_edge: Option<(EdgeKey, f64)> = None;

        for &key in &cycle.edges {
            let Some(edge) = self.graph.edge(key) else {
                continue;
            };
            incoming_weight.insert(edge.dst, edge.weight);
            circuit.push((key, edge.dst));
            if min_edge.map_or(true, |(_, w)| edge.weight < w) {
                min_edge = Some((key, edge.weight));
            }
        }
        let Some((min_edge, min_weight)) = min_edge else {
            return;
        };

        let super_node = self.next_node;
        self.next_node += 1;
        self.graph.add_node(super_node);

        // 进入环的边要替换掉环上指向同一节点的边，权重按被替换边调整
        let mut rewired = Vec::new();
        let mut entering = IndexMap::new();
        for (key, edge) in self.graph.edges_in_order() {
            let src_inside = incoming_weight.contains_key(&edge.src);
            match (src_inside, incoming_weight.get(&edge.dst)) {
                (true, Some(_)) | (false, None) => {}
                (true, None) => rewired.push((
                    key,
                    WorkEdge {
                        src: super_node,
                        ..edge
                    },
                )),
                (false, Some(&replaced)) => {
                    entering.insert(key, edge.dst);
                    rewired.push((
                        key,
                        WorkEdge {
                            dst: super_node,
                            weight: edge.weight + min_weight - replaced,
                            ..edge
                        },
                    ));
                }
            }
        }

        let chosen: HashSet<EdgeKey> = self.selected.values().map(|sel| sel.key).collect();
        for &node in &cycle.nodes {
            self.graph.remove_node(node);
            self.visited.remove(&node);
        }
        self.selected.retain(|node, sel| {
            !incoming_weight.contains_key(node) && !incoming_weight.contains_key(&sel.src)
        });

        for (key, edge) in rewired {
            self.graph.add_edge(key, edge);
            if chosen.contains(&key) {
                self.selected.insert(
                    edge.dst,
                    Selected {
                        key,
                        src: edge.src,
                    },
                );
                self.uf.union(edge.src, edge.dst);
            }
        }

        debug!(
            super_node,
            cycle_len = circuit.len(),
            min_weight,
            remaining = self.graph.nodes.len(),
            "收缩有向环"
        );
        self.rounds.push(Contraction {
            super_node,
            circuit,
            min_edge,
            entering,
        });
    }

    /// 逆序展开每一轮收缩，把环边补回并去掉恰好一条
    fn expand(&self) -> HashSet<EdgeKey> {
        let mut chosen: HashSet<EdgeKey> = self.selected.values().map(|sel| sel.key).collect();

        for round in self.rounds.iter().rev() {
            let target = round
                .entering
                .iter()
                .find(|(key, _)| chosen.contains(*key))
                .map(|(_, &target)| target);

            chosen.extend(round.circuit.iter().map(|&(key, _)| key));

            let dropped = match target {
                // 超级节点是根：去掉环上最轻的边
                None => Some(round.min_edge),
                Some(target) => round
                    .circuit
                    .iter()
                    .find(|&&(_, dst)| dst == target)
                    .map(|&(key, _)| key),
            };
            trace!(super_node = round.super_node, ?dropped, "展开收缩节点");
            if let Some(key) = dropped {
                chosen.remove(&key);
            }
        }

        chosen
    }
}

/// 求解统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveStats {
    /// 收缩轮数
    pub contractions: usize,
    /// 结果中的边数
    pub edges_selected: usize,
}

/// Edmonds 最优分支求解器
///
/// 不修改输入图；每次求解的中间状态都在调用内部分配并丢弃。
pub struct Edmonds<'a, N: NodeKey> {
    graph: &'a Graph<N>,
}

impl<'a, N: NodeKey> Edmonds<'a, N> {
    /// 创建求解器
    pub fn new(graph: &'a Graph<N>) -> Self {
        Self { graph }
    }

    /// 求最优分支或生成树形图（生成树形图是否成立由调用方检查）
    pub fn find_optimum(&self, weight: &EdgeWeight, kind: Kind, style: Style) -> Result<Graph<N>> {
        self.find_optimum_with_stats(weight, kind, style)
            .map(|(graph, _)| graph)
    }

    /// 同 [`Edmonds::find_optimum`]，并返回求解统计
    pub fn find_optimum_with_stats(
        &self,
        weight: &EdgeWeight,
        kind: Kind,
        style: Style,
    ) -> Result<(Graph<N>, SolveStats)> {
        ensure_directed(self.graph, "Edmonds")?;

        let mut position: HashMap<&N, NodeIx> = HashMap::with_capacity(self.graph.node_count());
        let mut work = WorkGraph::default();
        for (ix, node) in self.graph.nodes().enumerate() {
            position.insert(node, ix);
            work.add_node(ix);
        }

        let mut originals: Vec<&Edge<N>> = Vec::with_capacity(self.graph.edge_count());
        for node in self.graph.nodes() {
            for edge in self.graph.out_edges(node) {
                let key = originals.len();
                originals.push(edge);

                let w = kind.apply(edge.weight(weight));
                if edge.is_self_loop() || w.is_nan() {
                    continue;
                }
                let (Some(&src), Some(&dst)) = (position.get(edge.src()), position.get(edge.dst()))
                else {
                    continue;
                };
                work.add_edge(key, WorkEdge { src, dst, weight: w });
            }
        }

        let (chosen, contractions) = Solver::new(work, style, position.len()).run();

        let mut keys: Vec<EdgeKey> = chosen.into_iter().collect();
        keys.sort_unstable();

        let mut out = empty_like(self.graph);
        for key in keys {
            let Some(edge) = originals.get(key) else {
                continue;
            };
            out.add_edge_with_key(
                edge.src().clone(),
                edge.dst().clone(),
                edge.key(),
                weight.annotate(edge.properties()),
            )?;
        }

        let stats = SolveStats {
            contractions,
            edges_selected: out.edge_count(),
        };
        debug!(
            kind = %kind,
            style = %style,
            contractions,
            edges = stats.edges_selected,
            "最优分支求解完成"
        );
        Ok((out, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::test_support::{edge_triples, edmonds_graph, triples};
    use crate::error::Error;
    use crate::types::{Properties, PropertyValue};

    #[test]
    fn test_work_graph_remove_node_keeps_order() {
        let mut work = WorkGraph::default();
        for node in 0..4 {
            work.add_node(node);
        }
        work.add_edge(0, WorkEdge { src: 0, dst: 3, weight: 1.0 });
        work.add_edge(1, WorkEdge { src: 1, dst: 3, weight: 2.0 });
        work.add_edge(2, WorkEdge { src: 2, dst: 3, weight: 2.0 });
        work.add_edge(3, WorkEdge { src: 3, dst: 1, weight: 5.0 });

        assert_eq!(work.heaviest_in_edge(3).map(|(key, _)| key), Some(1));

        work.remove_node(1);
        assert_eq!(work.node_list(), vec![0, 2, 3]);
        assert!(work.edge(1).is_none());
        assert!(work.edge(3).is_none());
        assert_eq!(work.heaviest_in_edge(3).map(|(key, _)| key), Some(2));
        assert_eq!(
            work.edges_in_order().iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_contraction_rounds_recorded() {
        let graph = edmonds_graph(0.0);
        let (result, stats) = Edmonds::new(&graph)
            .find_optimum_with_stats(&EdgeWeight::default(), Kind::Max, Style::Branching)
            .unwrap();

        assert!(stats.contractions > 0);
        assert_eq!(stats.edges_selected, 8);
        assert_eq!(result.node_count(), 9);
    }

    #[test]
    fn test_two_cycle() {
        let mut graph = Graph::directed();
        graph.add_weighted_edge("r", "a", -1.0);
        graph.add_weighted_edge("a", "b", 10.0);
        graph.add_weighted_edge("b", "a", 8.0);

        let weight = EdgeWeight::default();
        let branching = Edmonds::new(&graph)
            .find_optimum(&weight, Kind::Max, Style::Branching)
            .unwrap();
        // 负权的 r -> a 不值得引入，环上去掉最轻的 b -> a
        assert_eq!(branching.edge_count(), 1);
        assert_eq!(branching.edges_between(&"a", &"b").len(), 1);

        let arborescence = Edmonds::new(&graph)
            .find_optimum(&weight, Kind::Max, Style::Arborescence)
            .unwrap();
        assert_eq!(arborescence.edge_count(), 2);
        assert_eq!(arborescence.edges_between(&"r", &"a").len(), 1);
        assert_eq!(arborescence.edges_between(&"a", &"b").len(), 1);
    }

    #[test]
    fn test_self_loop_excluded() {
        let mut graph = Graph::directed();
        graph.add_weighted_edge(0, 0, 50.0);
        graph.add_weighted_edge(1, 1, 5.0);
        graph.add_weighted_edge(0, 1, 2.0);

        let result = Edmonds::new(&graph)
            .find_optimum(&EdgeWeight::default(), Kind::Max, Style::Branching)
            .unwrap();

        assert_eq!(edge_triples(&result), triples(&[(0, 1, 2)]));
    }

    #[test]
    fn test_parallel_edges_keep_key_and_attributes() {
        let mut graph = Graph::directed();
        let mut light = Properties::new();
        light.insert("weight".to_string(), PropertyValue::Int(2));
        light.insert("name".to_string(), PropertyValue::from("light"));
        let mut heavy = Properties::new();
        heavy.insert("weight".to_string(), PropertyValue::Int(9));
        heavy.insert("name".to_string(), PropertyValue::from("heavy"));

        graph.add_edge("u", "v", light);
        let heavy_id = graph.add_edge("u", "v", heavy);

        let result = Edmonds::new(&graph)
            .find_optimum(&EdgeWeight::default(), Kind::Max, Style::Branching)
            .unwrap();

        assert_eq!(result.edge_count(), 1);
        let edge = result.edges().next().unwrap();
        assert_eq!(edge.key(), graph.edge(heavy_id).unwrap().key());
        assert_eq!(edge.property("name"), Some(&PropertyValue::from("heavy")));
        assert_eq!(edge.property("weight"), Some(&PropertyValue::Int(9)));
    }

    #[test]
    fn test_non_numeric_weight_passes_through() {
        let mut graph = Graph::directed();
        let mut props = Properties::new();
        props.insert("weight".to_string(), PropertyValue::from("heavy"));
        graph.add_edge("u", "v", props);

        let result = Edmonds::new(&graph)
            .find_optimum(&EdgeWeight::default(), Kind::Max, Style::Branching)
            .unwrap();

        let edge = result.edges().next().unwrap();
        assert_eq!(edge.property("weight"), Some(&PropertyValue::from("heavy")));
        assert_eq!(edge.weight(&EdgeWeight::default()), 1.0);
    }

    #[test]
    fn test_input_graph_untouched() {
        let graph = edmonds_graph(0.0);
        let before = edge_triples(&graph);

        Edmonds::new(&graph)
            .find_optimum(&EdgeWeight::default(), Kind::Min, Style::Arborescence)
            .unwrap();

        assert_eq!(edge_triples(&graph), before);
        assert_eq!(graph.edge_count(), 18);
    }

    #[test]
    fn test_empty_graph() {
        let graph: Graph<u32> = Graph::directed();
        let (result, stats) = Edmonds::new(&graph)
            .find_optimum_with_stats(&EdgeWeight::default(), Kind::Max, Style::Arborescence)
            .unwrap();
        assert_eq!(result.node_count(), 0);
        assert_eq!(stats, SolveStats::default());
    }

    #[test]
    fn test_rejects_undirected() {
        let mut graph = Graph::undirected();
        graph.add_weighted_edge(1, 2, 1.0);
        let err = Edmonds::new(&graph)
            .find_optimum(&EdgeWeight::default(), Kind::Max, Style::Branching)
            .unwrap_err();
        assert!(matches!(err, Error::NotImplemented(_)));
    }
}
