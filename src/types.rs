//! 通用类型定义：属性值、边权读取方式、优化方向与结果形态

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 默认的边权属性名
pub const DEFAULT_WEIGHT_ATTR: &str = "weight";

/// 属性值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(HashMap<String, PropertyValue>),
}

impl PropertyValue {
    /// 数值型属性统一转为 f64，用作边权
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(v) => Some(*v as f64),
            PropertyValue::UInt(v) => Some(*v as f64),
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::UInt(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::String(v) => write!(f, "{}", v),
            PropertyValue::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            PropertyValue::Map(map) => write!(f, "{{{} 项}}", map.len()),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<u64> for PropertyValue {
    fn from(v: u64) -> Self {
        PropertyValue::UInt(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

/// 属性映射
pub type Properties = HashMap<String, PropertyValue>;

/// 优化方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// 最大化总权重
    Max,
    /// 最小化总权重
    Min,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Max => "max",
            Kind::Min => "min",
        }
    }

    /// 把边权映射到统一的最大化问题上
    pub fn apply(&self, weight: f64) -> f64 {
        match self {
            Kind::Max => weight,
            Kind::Min => -weight,
        }
    }
}

impl Default for Kind {
    fn default() -> Self {
        Kind::Max
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "max" | "maximum" => Ok(Kind::Max),
            "min" | "minimum" => Ok(Kind::Min),
            other => Err(Error::InvalidArgument(format!(
                "未知的优化方向 `{}`，可选值: max, min",
                other
            ))),
        }
    }
}

/// 结果形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// 分支（森林，不要求覆盖全部节点）
    Branching,
    /// 生成树形图（覆盖全部节点且只有一个根）
    Arborescence,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Branching => "branching",
            Style::Arborescence => "arborescence",
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::Branching
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "branching" => Ok(Style::Branching),
            "arborescence" => Ok(Style::Arborescence),
            other => Err(Error::InvalidArgument(format!(
                "未知的结果形态 `{}`，可选值: branching, arborescence",
                other
            ))),
        }
    }
}

/// 边权读取方式
///
/// 从边属性 `attr` 读取数值权重，缺失或非数值时使用 `default`。
/// `attr` 为 `None` 时所有边的权重都是 `default`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeWeight {
    attr: Option<String>,
    default: f64,
}

impl EdgeWeight {
    /// 按属性名读取，默认值为 1
    pub fn new(attr: impl Into<String>) -> Self {
        Self {
            attr: Some(attr.into()),
            default: 1.0,
        }
    }

    /// 所有边使用同一权重
    pub fn uniform(weight: f64) -> Self {
        Self {
            attr: None,
            default: weight,
        }
    }

    /// 设置缺省权重
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    pub fn attr(&self) -> Option<&str> {
        self.attr.as_deref()
    }

    pub fn default_weight(&self) -> f64 {
        self.default
    }

    /// 解析一条边的权重
    pub fn of(&self, properties: &Properties) -> f64 {
        self.attr
            .as_deref()
            .and_then(|attr| properties.get(attr))
            .and_then(PropertyValue::as_f64)
            .unwrap_or(self.default)
    }

    /// 复制属性，权重属性缺失时写入缺省权重；已有的值原样保留
    pub(crate) fn annotate(&self, properties: &Properties) -> Properties {
        let mut props = properties.clone();
        if let Some(attr) = self.attr() {
            props
                .entry(attr.to_string())
                .or_insert(PropertyValue::Float(self.default));
        }
        props
    }
}

impl Default for EdgeWeight {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_ATTR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("max".parse::<Kind>().unwrap(), Kind::Max);
        assert_eq!(" MIN ".parse::<Kind>().unwrap(), Kind::Min);
        assert!(matches!(
            "biggest".parse::<Kind>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_style_parsing() {
        assert_eq!("branching".parse::<Style>().unwrap(), Style::Branching);
        assert_eq!(
            "Arborescence".parse::<Style>().unwrap(),
            Style::Arborescence
        );
        assert!(matches!("tree".parse::<Style>(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_edge_weight_resolution() {
        let mut props = Properties::new();
        props.insert("weight".to_string(), PropertyValue::Int(7));
        props.insert("cost".to_string(), PropertyValue::String("high".into()));

        let weight = EdgeWeight::default();
        assert_eq!(weight.of(&props), 7.0);

        // 非数值属性回退到默认值
        let cost = EdgeWeight::new("cost").with_default(6.0);
        assert_eq!(cost.of(&props), 6.0);

        let uniform = EdgeWeight::uniform(1.0);
        assert_eq!(uniform.of(&props), 1.0);
        assert_eq!(uniform.attr(), None);
    }

    #[test]
    fn test_annotate_keeps_existing_weight() {
        let mut props = Properties::new();
        props.insert("weight".to_string(), PropertyValue::Int(3));
        props.insert("label".to_string(), PropertyValue::from("a"));

        let annotated = EdgeWeight::default().annotate(&props);
        assert_eq!(annotated.get("weight"), Some(&PropertyValue::Int(3)));
        assert_eq!(annotated.get("label"), Some(&PropertyValue::from("a")));

        let filled = EdgeWeight::new("w").with_default(6.0).annotate(&props);
        assert_eq!(filled.get("w"), Some(&PropertyValue::Float(6.0)));
    }

    #[test]
    fn test_annotate_keeps_non_numeric_weight() {
        let mut props = Properties::new();
        props.insert("weight".to_string(), PropertyValue::from("heavy"));

        let weight = EdgeWeight::default().with_default(2.0);
        assert_eq!(weight.of(&props), 2.0);

        let annotated = weight.annotate(&props);
        assert_eq!(annotated.get("weight"), Some(&PropertyValue::from("heavy")));
    }

    #[test]
    fn test_kind_apply() {
        assert_eq!(Kind::Max.apply(3.5), 3.5);
        assert_eq!(Kind::Min.apply(3.5), -3.5);
    }
}
