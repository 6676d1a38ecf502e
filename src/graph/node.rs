//! 节点定义
//!
//! 节点标识是不透明的：只要求可克隆、可比较相等、可哈希。
//! 图内唯一可用的顺序是节点的发现序号。

use crate::types::{Properties, PropertyValue};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// 节点标识约束
pub trait NodeKey: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeKey for T {}

/// 节点数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// 发现序号（插入时单调递增）
    order: u64,
    /// 属性
    properties: Properties,
}

impl NodeData {
    /// 创建新节点数据
    pub fn new(order: u64) -> Self {
        Self {
            order,
            properties: Properties::new(),
        }
    }

    /// 获取发现序号
    pub fn order(&self) -> u64 {
        self.order
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

    pub(crate) fn merge_properties(&mut self, properties: Properties) {
        self.properties.extend(properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_properties() {
        let mut node = NodeData::new(3);
        assert_eq!(node.order(), 3);
        assert!(node.properties().is_empty());

        node.set_property("label".to_string(), PropertyValue::from("root"));
        assert_eq!(node.property("label"), Some(&PropertyValue::from("root")));

        let removed = node.remove_property("label");
        assert_eq!(removed, Some(PropertyValue::from("root")));
        assert!(node.property("label").is_none());
    }
}
