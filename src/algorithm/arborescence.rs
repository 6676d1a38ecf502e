//! 最优分支与生成树形图
//!
//! 四个入口都委托给 [`Edmonds`]，生成树形图额外检查结果是否覆盖全部节点。

use super::edmonds::{Edmonds, SolveStats};
use super::recognition::is_arborescence;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeKey};
use crate::types::{EdgeWeight, Kind, Style};

/// 按 `kind` 与 `style` 求最优分支或生成树形图
pub fn optimum_branching<N: NodeKey>(
    graph: &Graph<N>,
    weight: &EdgeWeight,
    kind: Kind,
    style: Style,
) -> Result<Graph<N>> {
    optimum_branching_with_stats(graph, weight, kind, style).map(|(result, _)| result)
}

/// 同 [`optimum_branching`]，附带求解统计
pub fn optimum_branching_with_stats<N: NodeKey>(
    graph: &Graph<N>,
    weight: &EdgeWeight,
    kind: Kind,
    style: Style,
) -> Result<(Graph<N>, SolveStats)> {
    let (result, stats) = Edmonds::new(graph).find_optimum_with_stats(weight, kind, style)?;

    if style == Style::Arborescence && graph.node_count() > 0 && !is_arborescence(&result) {
        let what = match kind {
            Kind::Max => "最大生成树形图",
            Kind::Min => "最小生成树形图",
        };
        return Err(Error::NoArborescence(what.to_string()));
    }

    Ok((result, stats))
}

/// 最大权分支
pub fn maximum_branching<N: NodeKey>(graph: &Graph<N>, weight: &EdgeWeight) -> Result<Graph<N>> {
    optimum_branching(graph, weight, Kind::Max, Style::Branching)
}

/// 最小权分支（只会选入负权边）
pub fn minimum_branching<N: NodeKey>(graph: &Graph<N>, weight: &EdgeWeight) -> Result<Graph<N>> {
    optimum_branching(graph, weight, Kind::Min, Style::Branching)
}

/// 最大生成树形图，不存在时返回 [`Error::NoArborescence`]
pub fn maximum_spanning_arborescence<N: NodeKey>(
    graph: &Graph<N>,
    weight: &EdgeWeight,
) -> Result<Graph<N>> {
    optimum_branching(graph, weight, Kind::Max, Style::Arborescence)
}

/// 最小生成树形图，不存在时返回 [`Error::NoArborescence`]
pub fn minimum_spanning_arborescence<N: NodeKey>(
    graph: &Graph<N>,
    weight: &EdgeWeight,
) -> Result<Graph<N>> {
    optimum_branching(graph, weight, Kind::Min, Style::Arborescence)
}
