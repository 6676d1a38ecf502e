//! 图数据结构
//!
//! 带权多重图，支持有向与无向两种形态

use super::edge::{Edge, EdgeId};
use super::index::AdjacencyIndex;
use super::node::{NodeData, NodeKey};
use crate::error::{Error, Result};
use crate::types::{EdgeWeight, Properties, PropertyValue};
use indexmap::IndexMap;
use std::collections::HashSet;

/// 多重图
#[derive(Debug, Clone)]
pub struct Graph<N: NodeKey> {
    /// 是否为有向图
    directed: bool,
    /// 节点表（保持插入顺序）
    nodes: IndexMap<N, NodeData>,
    /// 边表（保持插入顺序）
    edges: IndexMap<EdgeId, Edge<N>>,
    /// 邻接索引
    index: AdjacencyIndex<N>,
    /// 下一个节点发现序号
    next_node_order: u64,
    /// 下一个边 ID
    next_edge_id: u64,
}

impl<N: NodeKey> Graph<N> {
    /// 创建有向多重图
    pub fn directed() -> Self {
        Self::with_direction(true)
    }

    /// 创建无向多重图
    pub fn undirected() -> Self {
        Self::with_direction(false)
    }

    fn with_direction(directed: bool) -> Self {
        Self {
            directed,
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            index: AdjacencyIndex::new(),
            next_node_order: 0,
            next_edge_id: 0,
        }
    }

    /// 是否为有向图
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    // ==================== 节点操作 ====================

    /// 添加节点，已存在时返回 false
    pub fn add_node(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        let data = NodeData::new(self.next_node_order);
        self.next_node_order += 1;
        self.index.add_node(&node);
        self.nodes.insert(node, data);
        true
    }

    /// 添加节点并合并属性
    pub fn add_node_with_properties(&mut self, node: N, properties: Properties) {
        self.add_node(node.clone());
        if let Some(data) = self.nodes.get_mut(&node) {
            data.merge_properties(properties);
        }
    }

    /// 节点是否存在
    pub fn has_node(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    /// 获取节点数据
    pub fn node(&self, node: &N) -> Option<&NodeData> {
        self.nodes.get(node)
    }

    /// 设置节点属性
    pub fn set_node_property(&mut self, node: &N, key: &str, value: PropertyValue) -> Result<()> {
        let data = self
            .nodes
            .get_mut(node)
            .ok_or_else(|| Error::NodeNotFound(format!("{:?}", node)))?;
        data.set_property(key.to_string(), value);
        Ok(())
    }

    /// 获取节点发现序号
    pub fn node_order(&self, node: &N) -> Option<u64> {
        self.nodes.get(node).map(NodeData::order)
    }

    /// 按插入顺序遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.keys()
    }

    /// 按插入顺序遍历节点及其数据
    pub fn node_entries(&self) -> impl Iterator<Item = (&N, &NodeData)> + '_ {
        self.nodes.iter()
    }

    /// 删除节点及其关联的边
    pub fn remove_node(&mut self, node: &N) -> Result<()> {
        if !self.nodes.contains_key(node) {
            return Err(Error::NodeNotFound(format!("{:?}", node)));
        }

        let incident: HashSet<EdgeId> = self
            .index
            .get_outgoing(node)
            .iter()
            .chain(self.index.get_incoming(node).iter())
            .copied()
            .collect();
        for edge_id in incident {
            self.remove_edge_by_id(edge_id)?;
        }

        self.index.remove_node(node);
        self.nodes.shift_remove(node);
        Ok(())
    }

    /// 获取节点数量
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ==================== 边操作 ====================

    /// 添加边，缺失的端点会自动创建，返回新边的 ID
    pub fn add_edge(&mut self, src: N, dst: N, properties: Properties) -> EdgeId {
        let key = self.next_key(&src, &dst);
        self.insert_edge(src, dst, key, properties)
    }

    /// 添加带权边（权重写入 `weight` 属性）
    pub fn add_weighted_edge(&mut self, src: N, dst: N, weight: f64) -> EdgeId {
        let mut properties = Properties::new();
        properties.insert(
            crate::types::DEFAULT_WEIGHT_ATTR.to_string(),
            PropertyValue::Float(weight),
        );
        self.add_edge(src, dst, properties)
    }

    /// 以指定平行边键添加边
    pub fn add_edge_with_key(
        &mut self,
        src: N,
        dst: N,
        key: u64,
        properties: Properties,
    ) -> Result<EdgeId> {
        if self.find_edge(&src, &dst, key).is_some() {
            return Err(Error::EdgeKeyExists(format!(
                "{:?} -> {:?} (key {})",
                src, dst, key
            )));
        }
        Ok(self.insert_edge(src, dst, key, properties))
    }

    fn insert_edge(&mut self, src: N, dst: N, key: u64, properties: Properties) -> EdgeId {
        self.add_node(src.clone());
        self.add_node(dst.clone());

        let id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        self.index.add_edge(id, &src, &dst, self.directed);
        let edge = Edge::new(id, src, dst, key).with_properties(properties);
        self.edges.insert(id, edge);
        id
    }

    /// 同一点对下一个可用的平行边键
    fn next_key(&self, src: &N, dst: &N) -> u64 {
        let used: HashSet<u64> = self
            .edges_between(src, dst)
            .into_iter()
            .map(Edge::key)
            .collect();
        let mut key = used.len() as u64;
        while used.contains(&key) {
            key += 1;
        }
        key
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge<N>> {
        self.edges.get(&id)
    }

    /// 获取可修改的边（仅属性可改）
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge<N>> {
        self.edges.get_mut(&id)
    }

    /// 按 (src, dst, key) 查找边
    pub fn find_edge(&self, src: &N, dst: &N, key: u64) -> Option<&Edge<N>> {
        self.edges_between(src, dst)
            .into_iter()
            .find(|edge| edge.key() == key)
    }

    /// 获取两点之间的所有边
    pub fn edges_between(&self, src: &N, dst: &N) -> Vec<&Edge<N>> {
        self.index
            .get_edges_between(src, dst)
            .iter()
            .filter_map(|id| self.edges.get(id))
            .collect()
    }

    /// 按插入顺序遍历所有边
    pub fn edges(&self) -> impl Iterator<Item = &Edge<N>> + '_ {
        self.edges.values()
    }

    /// 遍历所有边及其解析后的权重
    pub fn weighted_edges<'a>(
        &'a self,
        weight: &'a EdgeWeight,
    ) -> impl Iterator<Item = (&'a N, &'a N, f64)> + 'a {
        self.edges
            .values()
            .map(move |edge| (edge.src(), edge.dst(), edge.weight(weight)))
    }

    /// 按 (src, dst, key) 删除边
    pub fn remove_edge(&mut self, src: &N, dst: &N, key: u64) -> Result<()> {
        let id = self
            .find_edge(src, dst, key)
            .map(Edge::id)
            .ok_or_else(|| Error::EdgeNotFound(format!("{:?} -> {:?} (key {})", src, dst, key)))?;
        self.remove_edge_by_id(id)?;
        Ok(())
    }

    /// 按 ID 删除边
    pub fn remove_edge_by_id(&mut self, id: EdgeId) -> Result<Edge<N>> {
        let edge = self
            .edges
            .shift_remove(&id)
            .ok_or_else(|| Error::EdgeNotFound(format!("{:?}", id)))?;
        self.index
            .remove_edge(id, edge.src(), edge.dst(), self.directed);
        Ok(edge)
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ==================== 邻接查询 ====================

    /// 获取节点的所有出边（无向图为全部关联边）
    pub fn out_edges(&self, node: &N) -> Vec<&Edge<N>> {
        self.index
            .get_outgoing(node)
            .iter()
            .filter_map(|id| self.edges.get(id))
            .collect()
    }

    /// 获取节点的所有入边（无向图为全部关联边）
    pub fn in_edges(&self, node: &N) -> Vec<&Edge<N>> {
        self.index
            .get_incoming(node)
            .iter()
            .filter_map(|id| self.edges.get(id))
            .collect()
    }

    /// 获取节点的出度
    pub fn out_degree(&self, node: &N) -> usize {
        self.index.out_degree(node)
    }

    /// 获取节点的入度
    pub fn in_degree(&self, node: &N) -> usize {
        self.index.in_degree(node)
    }

    /// 获取节点的度，无向图中自环计两次
    pub fn degree(&self, node: &N) -> usize {
        if self.directed {
            return self.index.out_degree(node) + self.index.in_degree(node);
        }
        self.out_edges(node)
            .iter()
            .map(|edge| if edge.is_self_loop() { 2 } else { 1 })
            .sum()
    }

    /// 获取后继节点（出边指向的节点）
    pub fn successors(&self, node: &N) -> Vec<N> {
        self.out_edges(node)
            .into_iter()
            .map(|edge| Self::other_end(edge, node))
            .collect()
    }

    /// 获取前驱节点（入边来源的节点）
    pub fn predecessors(&self, node: &N) -> Vec<N> {
        self.in_edges(node)
            .into_iter()
            .map(|edge| {
                if self.directed {
                    edge.src().clone()
                } else {
                    Self::other_end(edge, node)
                }
            })
            .collect()
    }

    fn other_end(edge: &Edge<N>, node: &N) -> N {
        if edge.src() == node {
            edge.dst().clone()
        } else {
            edge.src().clone()
        }
    }

    // ==================== 派生图 ====================

    /// 导出子图：保留给定节点及两端都在其中的边
    pub fn subgraph<'a, I>(&self, nodes: I) -> Self
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        let keep: HashSet<&N> = nodes.into_iter().filter(|n| self.has_node(n)).collect();
        let mut sub = Self::with_direction(self.directed);

        for (node, data) in &self.nodes {
            if keep.contains(node) {
                sub.add_node_with_properties(node.clone(), data.properties().clone());
            }
        }
        for edge in self.edges.values() {
            if keep.contains(edge.src()) && keep.contains(edge.dst()) {
                sub.index
                    .add_edge(edge.id(), edge.src(), edge.dst(), sub.directed);
                sub.edges.insert(edge.id(), edge.clone());
            }
        }
        sub.next_edge_id = self.next_edge_id;
        sub
    }

    /// 转为有向图：无向边拆成方向相反、键和属性相同的两条边
    pub fn to_directed(&self) -> Self {
        if self.directed {
            return self.clone();
        }

        let mut directed = Self::directed();
        for (node, data) in &self.nodes {
            directed.add_node_with_properties(node.clone(), data.properties().clone());
        }
        for node in self.nodes.keys() {
            for edge in self.out_edges(node) {
                let other = Self::other_end(edge, node);
                directed.insert_edge(node.clone(), other, edge.key(), edge.properties().clone());
            }
        }
        directed
    }
}

impl<N: NodeKey> Default for Graph<N> {
    fn default() -> Self {
        Self::directed()
    }
}
