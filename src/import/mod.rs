//! 数据导入模块
//!
//! 从带表头的 CSV 边表构造 `Graph<String>`

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{Properties, PropertyValue};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// 导入统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub nodes_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 导入选项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// false 时构造无向图
    pub directed: bool,
    pub delimiter: u8,
    pub source_column: String,
    pub target_column: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            directed: true,
            delimiter: b',',
            source_column: "source".to_string(),
            target_column: "target".to_string(),
        }
    }
}

/// 边表导入器
///
/// 表头中除源、目标两列之外的列都作为边属性导入，空单元格跳过。
pub struct EdgeListImporter {
    options: ImportOptions,
}

impl EdgeListImporter {
    /// 创建导入器
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// 从 CSV 文件导入
    pub fn import_csv<P: AsRef<Path>>(&self, path: P) -> Result<(Graph<String>, ImportStats)> {
        let path = path.as_ref();
        debug!(path = %path.display(), "导入边表");
        let file = File::open(path)?;
        self.import_reader(file)
    }

    /// 从任意读取器导入
    pub fn import_reader<R: Read>(&self, reader: R) -> Result<(Graph<String>, ImportStats)> {
        let start = std::time::Instant::now();
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.options.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let src_col = self.column(&headers, &self.options.source_column)?;
        let dst_col = self.column(&headers, &self.options.target_column)?;

        let mut graph = if self.options.directed {
            Graph::directed()
        } else {
            Graph::undirected()
        };
        let mut stats = ImportStats::default();

        for (row, record) in rdr.records().enumerate() {
            // 表头占第 1 行
            let line = row + 2;
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    warn!(line, error = %e, "跳过无法解析的行");
                    stats.errors += 1;
                    continue;
                }
            };

            let src = record.get(src_col).filter(|s| !s.is_empty());
            let dst = record.get(dst_col).filter(|s| !s.is_empty());
            let (Some(src), Some(dst)) = (src, dst) else {
                warn!(line, "缺少源节点或目标节点，跳过");
                stats.errors += 1;
                continue;
            };

            let mut properties = Properties::new();
            for (ix, (name, cell)) in headers.iter().zip(record.iter()).enumerate() {
                if ix == src_col || ix == dst_col || cell.is_empty() {
                    continue;
                }
                properties.insert(name.to_string(), parse_value(cell));
            }

            graph.add_edge(src.to_string(), dst.to_string(), properties);
            stats.edges_imported += 1;
        }

        stats.nodes_imported = graph.node_count();
        stats.duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            nodes = stats.nodes_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            "边表导入完成"
        );
        Ok((graph, stats))
    }

    fn column(&self, headers: &StringRecord, name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::ImportError(format!("表头缺少列 '{}'", name)))
    }
}

impl Default for EdgeListImporter {
    fn default() -> Self {
        Self::new(ImportOptions::default())
    }
}

/// 单元格按 布尔、整数、浮点数、字符串 的顺序解析
fn parse_value(cell: &str) -> PropertyValue {
    if let Ok(b) = cell.parse::<bool>() {
        PropertyValue::Bool(b)
    } else if let Ok(i) = cell.parse::<i64>() {
        PropertyValue::Int(i)
    } else if let Ok(f) = cell.parse::<f64>() {
        PropertyValue::Float(f)
    } else {
        PropertyValue::String(cell.to_string())
    }
}

/// 用默认选项导入 CSV 边表
pub fn import_edge_list<P: AsRef<Path>>(path: P) -> Result<(Graph<String>, ImportStats)> {
    EdgeListImporter::default().import_csv(path)
}
