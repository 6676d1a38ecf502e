//! 结果打印器
//!
//! 提供表格、垂直和 JSON 格式的报告输出

use super::SolveReport;
use crate::error::{Error, Result};
use prettytable::{format, row, Cell, Row, Table};
use std::str::FromStr;

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式，每条边一段
    Vertical,
    Json,
}

impl FromStr for PrintMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(PrintMode::Table),
            "vertical" => Ok(PrintMode::Vertical),
            "json" => Ok(PrintMode::Json),
            other => Err(Error::InvalidArgument(format!("未知的输出格式: {}", other))),
        }
    }
}

/// 报告打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 渲染一份求解报告
    pub fn print_report(&self, report: &SolveReport) -> Result<String> {
        if self.mode == PrintMode::Json {
            return serde_json::to_string_pretty(report)
                .map_err(|e| Error::SerializationError(e.to_string()));
        }

        let columns = ["source", "target", "key", "weight"];
        let rows: Vec<Vec<String>> = report
            .selected
            .iter()
            .map(|edge| {
                vec![
                    edge.source.clone(),
                    edge.target.clone(),
                    edge.key.to_string(),
                    edge.weight.to_string(),
                ]
            })
            .collect();

        let mut output = self.print_summary(report);
        output.push('\n');
        if rows.is_empty() {
            output.push_str(&format!("Empty set ({} ms)\n", report.duration_ms));
            return Ok(output);
        }

        output.push_str(&match self.mode {
            PrintMode::Vertical => self.format_vertical(&columns, &rows),
            _ => self.format_table(&columns, &rows),
        });
        output.push_str(&format!(
            "\n{} edge(s) selected ({} ms)\n",
            rows.len(),
            report.duration_ms
        ));
        Ok(output)
    }

    /// 表格格式
    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. edge ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 报告摘要
    pub fn print_summary(&self, report: &SolveReport) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["File", report.file]);
        table.add_row(row!["Problem", format!("{} {}", report.kind, report.style)]);
        table.add_row(row!["Node Count", report.nodes.to_string()]);
        table.add_row(row!["Edge Count", report.edges.to_string()]);
        table.add_row(row!["Skipped Rows", report.import_errors.to_string()]);
        table.add_row(row!["Contractions", report.contractions.to_string()]);
        table.add_row(row!["Total Weight", report.total_weight.to_string()]);
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::EdgeRow;
    use crate::types::{Kind, Style};

    fn report(selected: Vec<EdgeRow>) -> SolveReport {
        SolveReport {
            file: "edges.csv".to_string(),
            kind: Kind::Max,
            style: Style::Branching,
            nodes: 3,
            edges: 3,
            import_errors: 0,
            contractions: 1,
            total_weight: 10.0,
            duration_ms: 2,
            selected,
        }
    }

    fn one_edge() -> Vec<EdgeRow> {
        vec![EdgeRow {
            source: "a".to_string(),
            target: "b".to_string(),
            key: 0,
            weight: 10.0,
        }]
    }

    #[test]
    fn test_print_mode_from_str() {
        assert_eq!("JSON".parse::<PrintMode>().unwrap(), PrintMode::Json);
        assert_eq!("vertical".parse::<PrintMode>().unwrap(), PrintMode::Vertical);
        assert!("xml".parse::<PrintMode>().is_err());
    }

    #[test]
    fn test_print_table() {
        let output = Printer::default().print_report(&report(one_edge())).unwrap();
        assert!(output.contains("Total Weight"));
        assert!(output.contains("max branching"));
        assert!(output.contains("1 edge(s) selected"));
    }

    #[test]
    fn test_print_vertical() {
        let output = Printer::new(PrintMode::Vertical)
            .print_report(&report(one_edge()))
            .unwrap();
        assert!(output.contains("1. edge"));
        assert!(output.contains("target: b"));
    }

    #[test]
    fn test_print_empty() {
        let output = Printer::default().print_report(&report(Vec::new())).unwrap();
        assert!(output.contains("Empty set"));
    }

    #[test]
    fn test_print_json() {
        let output = Printer::new(PrintMode::Json)
            .print_report(&report(one_edge()))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["kind"], "max");
        assert_eq!(value["selected"][0]["target"], "b");
    }
}
