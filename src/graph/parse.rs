use serde::Deserialize;

use crate::error::LoadError;

use super::model::{Direction, Graph, GraphLink, GraphNode};

#[derive(Debug, Deserialize)]
struct RawGraph {
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    name: String,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    first: String,
    second: String,
    weight: u32,
    #[serde(default, rename = "directedTo")]
    directed_to: Option<Direction>,
    #[serde(default)]
    url: Option<String>,
}

pub(super) fn parse_graph(raw: &str) -> Result<Graph, LoadError> {
    let parsed: RawGraph = serde_json::from_str(raw)?;

    let nodes = parsed
        .nodes
        .into_iter()
        .map(|node| GraphNode {
            name: node.name,
            url: node.url.filter(|url| !url.is_empty()),
        })
        .collect();

    let links = parsed
        .links
        .into_iter()
        .map(|link| GraphLink {
            first: link.first,
            second: link.second,
            weight: link.weight,
            directed_to: link.directed_to,
            url: link.url.filter(|url| !url.is_empty()),
        })
        .collect();

    Graph::new(nodes, links)
}

impl Graph {
    /// Decodes a graph from its JSON form and validates it.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        parse_graph(raw)
    }
}
