//! 命令行求解
//!
//! 读取 CSV 边表、求解并生成报告，供 `graphbranch-cli` 使用

mod printer;

pub use printer::{PrintMode, Printer};

use crate::algorithm::{branching_weight, optimum_branching_with_stats};
use crate::error::Result;
use crate::import::{EdgeListImporter, ImportOptions};
use crate::types::{EdgeWeight, Kind, Style, DEFAULT_WEIGHT_ATTR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// 求解配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    pub kind: Kind,
    pub style: Style,
    /// 权重属性名
    pub weight_attr: String,
    /// 缺少权重属性时使用的默认值
    pub default_weight: f64,
    /// 忽略属性，所有边权重取默认值
    pub uniform: bool,
    /// 把输入当作无向图，求解前转换为双向有向图
    pub undirected: bool,
    pub delimiter: u8,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            kind: Kind::Max,
            style: Style::Branching,
            weight_attr: DEFAULT_WEIGHT_ATTR.to_string(),
            default_weight: 1.0,
            uniform: false,
            undirected: false,
            delimiter: b',',
        }
    }
}

impl SolveOptions {
    /// 解析出边权读取方式
    pub fn edge_weight(&self) -> EdgeWeight {
        if self.uniform {
            EdgeWeight::uniform(self.default_weight)
        } else {
            EdgeWeight::new(self.weight_attr.clone()).with_default(self.default_weight)
        }
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            directed: !self.undirected,
            delimiter: self.delimiter,
            ..ImportOptions::default()
        }
    }
}

/// 结果中的一条边
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    pub key: u64,
    pub weight: f64,
}

/// 单个文件的求解报告
#[derive(Debug, Clone, Serialize)]
pub struct SolveReport {
    pub file: String,
    pub kind: Kind,
    pub style: Style,
    pub nodes: usize,
    pub edges: usize,
    pub import_errors: usize,
    pub contractions: usize,
    pub total_weight: f64,
    pub duration_ms: u64,
    pub selected: Vec<EdgeRow>,
}

/// 导入一个边表文件并求解
pub fn solve_file<P: AsRef<Path>>(path: P, options: &SolveOptions) -> Result<SolveReport> {
    let path = path.as_ref();
    let start = Instant::now();

    let importer = EdgeListImporter::new(options.import_options());
    let (graph, stats) = importer.import_csv(path)?;
    let graph = if graph.is_directed() {
        graph
    } else {
        graph.to_directed()
    };

    let weight = options.edge_weight();
    let (result, solve_stats) =
        optimum_branching_with_stats(&graph, &weight, options.kind, options.style)?;

    let selected = result
        .edges()
        .map(|edge| EdgeRow {
            source: edge.src().clone(),
            target: edge.dst().clone(),
            key: edge.key(),
            weight: edge.weight(&weight),
        })
        .collect();

    let report = SolveReport {
        file: path.display().to_string(),
        kind: options.kind,
        style: options.style,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        import_errors: stats.errors,
        contractions: solve_stats.contractions,
        total_weight: branching_weight(&result, &weight),
        duration_ms: start.elapsed().as_millis() as u64,
        selected,
    };
    info!(
        file = %report.file,
        selected = report.selected.len(),
        total_weight = report.total_weight,
        "求解完成"
    );
    Ok(report)
}
