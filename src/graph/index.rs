//! 邻接索引
//!
//! 按节点维护出边、入边列表和点对到边的映射，均保持插入顺序

use crate::graph::edge::EdgeId;
use crate::graph::node::NodeKey;
use std::collections::HashMap;

/// 邻接索引
///
/// 无向图中每条边同时登记在两个端点的出边和入边列表里，
/// 点对映射两个方向都指向同一个列表内容。
#[derive(Debug, Clone)]
pub struct AdjacencyIndex<N: NodeKey> {
    /// 节点到出边的映射
    outgoing: HashMap<N, Vec<EdgeId>>,
    /// 节点到入边的映射
    incoming: HashMap<N, Vec<EdgeId>>,
    /// (src, dst) 到边 ID 列表的映射（支持多重边）
    pair_to_edges: HashMap<(N, N), Vec<EdgeId>>,
}

impl<N: NodeKey> AdjacencyIndex<N> {
    /// 创建新索引
    pub fn new() -> Self {
        Self {
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            pair_to_edges: HashMap::new(),
        }
    }

    /// 登记节点
    pub fn add_node(&mut self, node: &N) {
        self.outgoing.entry(node.clone()).or_default();
        self.incoming.entry(node.clone()).or_default();
    }

    /// 添加边
    pub fn add_edge(&mut self, edge_id: EdgeId, src: &N, dst: &N, directed: bool) {
        self.outgoing
            .entry(src.clone())
            .or_default()
            .push(edge_id);
        self.incoming
            .entry(dst.clone())
            .or_default()
            .push(edge_id);
        self.pair_to_edges
            .entry((src.clone(), dst.clone()))
            .or_default()
            .push(edge_id);

        if !directed && src != dst {
            self.outgoing
                .entry(dst.clone())
                .or_default()
                .push(edge_id);
            self.incoming
                .entry(src.clone())
                .or_default()
                .push(edge_id);
            self.pair_to_edges
                .entry((dst.clone(), src.clone()))
                .or_default()
                .push(edge_id);
        }
    }

    /// 移除边
    pub fn remove_edge(&mut self, edge_id: EdgeId, src: &N, dst: &N, directed: bool) {
        let strip = |map: &mut HashMap<N, Vec<EdgeId>>, node: &N| {
            if let Some(edges) = map.get_mut(node) {
                edges.retain(|&id| id != edge_id);
            }
        };
        strip(&mut self.outgoing, src);
        strip(&mut self.incoming, dst);
        if !directed {
            strip(&mut self.outgoing, dst);
            strip(&mut self.incoming, src);
        }

        for pair in [(src.clone(), dst.clone()), (dst.clone(), src.clone())] {
            if let Some(edges) = self.pair_to_edges.get_mut(&pair) {
                edges.retain(|&id| id != edge_id);
                if edges.is_empty() {
                    self.pair_to_edges.remove(&pair);
                }
            }
        }
    }

    /// 移除节点的索引项，调用方需先移除关联的边
    pub fn remove_node(&mut self, node: &N) {
        self.outgoing.remove(node);
        self.incoming.remove(node);
    }

    /// 获取节点的出边
    pub fn get_outgoing(&self, node: &N) -> &[EdgeId] {
        self.outgoing.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 获取节点的入边
    pub fn get_incoming(&self, node: &N) -> &[EdgeId] {
        self.incoming.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 获取两点之间的所有边
    pub fn get_edges_between(&self, src: &N, dst: &N) -> &[EdgeId] {
        self.pair_to_edges
            .get(&(src.clone(), dst.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 获取节点的出度
    pub fn out_degree(&self, node: &N) -> usize {
        self.get_outgoing(node).len()
    }

    /// 获取节点的入度
    pub fn in_degree(&self, node: &N) -> usize {
        self.get_incoming(node).len()
    }
}

impl<N: NodeKey> Default for AdjacencyIndex<N> {
    fn default() -> Self {
        Self::new()
    }
}
