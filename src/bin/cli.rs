//! graphbranch CLI 工具
//!
//! 对一个或多个 CSV 边表求最优分支或生成树形图

use anyhow::{bail, Context};
use clap::Parser;
use colored::Colorize;
use graphbranch::cli::{solve_file, PrintMode, Printer, SolveOptions};
use graphbranch::{Kind, Style};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graphbranch-cli")]
#[command(about = "有向图最优分支 / 生成树形图求解工具", version)]
struct Args {
    /// 边表文件（CSV，需包含 source、target 两列）
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// 优化方向: max, min
    #[arg(short, long, default_value = "max")]
    kind: Kind,

    /// 结果形态: branching, arborescence
    #[arg(short, long, default_value = "branching")]
    style: Style,

    /// 权重属性列名
    #[arg(short, long, default_value = "weight")]
    attr: String,

    /// 缺少权重时的默认值
    #[arg(short, long, default_value = "1")]
    default: f64,

    /// 忽略权重列，所有边取默认值
    #[arg(long)]
    uniform: bool,

    /// 按无向图读取
    #[arg(long)]
    undirected: bool,

    /// 列分隔符
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// 输出格式: table, vertical, json
    #[arg(short, long, default_value = "table")]
    format: PrintMode,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("graphbranch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if !args.delimiter.is_ascii() {
        bail!("分隔符必须是单个 ASCII 字符: {:?}", args.delimiter);
    }

    let options = SolveOptions {
        kind: args.kind,
        style: args.style,
        weight_attr: args.attr.clone(),
        default_weight: args.default,
        uniform: args.uniform,
        undirected: args.undirected,
        delimiter: args.delimiter as u8,
    };
    let printer = Printer::new(args.format);

    // 各文件独立求解，输出保持输入顺序
    let results: Vec<_> = args
        .files
        .par_iter()
        .map(|path| {
            solve_file(path, &options).with_context(|| format!("求解 {} 失败", path.display()))
        })
        .collect();

    let mut failed = 0;
    for result in results {
        match result {
            Ok(report) => {
                if args.format != PrintMode::Json {
                    println!("{} {}", "✓".green(), report.file.bold());
                }
                println!("{}", printer.print_report(&report)?);
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {:#}", "✗".red(), e);
            }
        }
    }

    if failed > 0 {
        bail!("{} 个文件求解失败", failed);
    }
    Ok(())
}
