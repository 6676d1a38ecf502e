//! 边定义
//!
//! 有向（或无向）多重图的边：唯一 ID、端点、平行边键和属性

use crate::types::{EdgeWeight, Properties, PropertyValue};
use serde::{Deserialize, Serialize};

/// 边 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl EdgeId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// 边
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<N> {
    /// 边 ID
    id: EdgeId,
    /// 源节点
    src: N,
    /// 目标节点
    dst: N,
    /// 平行边键，区分同一对节点间的多条边
    key: u64,
    /// 属性
    properties: Properties,
}

impl<N> Edge<N> {
    /// 创建新边
    pub fn new(id: EdgeId, src: N, dst: N, key: u64) -> Self {
        Self {
            id,
            src,
            dst,
            key,
            properties: Properties::new(),
        }
    }

    /// 附带属性创建
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取源节点
    pub fn src(&self) -> &N {
        &self.src
    }

    /// 获取目标节点
    pub fn dst(&self) -> &N {
        &self.dst
    }

    /// 获取平行边键
    pub fn key(&self) -> u64 {
        self.key
    }

    /// 获取属性
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// 设置属性
    pub fn set_property(&mut self, key: String, value: PropertyValue) {
        self.properties.insert(key, value);
    }

    /// 移除属性
    pub fn remove_property(&mut self, key: &str) -> Option<PropertyValue> {
        self.properties.remove(key)
    }

    /// 获取所有属性
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// 按给定读取方式解析边权
    pub fn weight(&self, weight: &EdgeWeight) -> f64 {
        weight.of(&self.properties)
    }
}

impl<N: PartialEq> Edge<N> {
    /// 是否为自环
    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_basic() {
        let mut props = Properties::new();
        props.insert("weight".to_string(), PropertyValue::Int(12));
        let e = Edge::new(EdgeId::new(1), 0u32, 2u32, 0).with_properties(props);

        assert_eq!(e.id().as_u64(), 1);
        assert_eq!(*e.src(), 0);
        assert_eq!(*e.dst(), 2);
        assert_eq!(e.key(), 0);
        assert!(!e.is_self_loop());
        assert_eq!(e.weight(&EdgeWeight::default()), 12.0);
    }

    #[test]
    fn test_edge_weight_default() {
        let mut e = Edge::new(EdgeId::new(7), "a", "a", 1);
        assert!(e.is_self_loop());
        assert_eq!(e.weight(&EdgeWeight::default()), 1.0);
        assert_eq!(e.weight(&EdgeWeight::default().with_default(6.0)), 6.0);

        e.set_property("weight".to_string(), PropertyValue::Float(-2.5));
        assert_eq!(e.weight(&EdgeWeight::default()), -2.5);
        assert!(e.remove_property("weight").is_some());
        assert_eq!(e.weight(&EdgeWeight::default()), 1.0);
    }
}
