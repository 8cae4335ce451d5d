use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

pub const MAX_WEIGHT: u32 = 100;

/// Which end of a link the arrowhead points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    First,
    Second,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub url: Option<String>,
}

/// A weighted connection between two nodes, referenced by name.
///
/// The weight lies between 0 and 100; the higher it is, the closer the two
/// nodes should be drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphLink {
    pub first: String,
    pub second: String,
    pub weight: u32,
    pub directed_to: Option<Direction>,
    pub url: Option<String>,
}

/// A validated graph: unique node names, every link endpoint resolved.
#[derive(Clone, Debug)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    links: Vec<GraphLink>,
    endpoints: Vec<(usize, usize)>,
}

impl Graph {
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Result<Self, LoadError> {
        let mut index_by_name = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_name.insert(node.name.as_str(), index).is_some() {
                return Err(LoadError::DuplicateNode {
                    name: node.name.clone(),
                });
            }
        }

        let mut endpoints = Vec::with_capacity(links.len());
        for (link_index, link) in links.iter().enumerate() {
            if link.weight > MAX_WEIGHT {
                return Err(LoadError::WeightOutOfRange {
                    link: link_index,
                    weight: link.weight,
                });
            }

            let resolve = |name: &str| {
                index_by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| LoadError::UnknownNode {
                        link: link_index,
                        name: name.to_owned(),
                    })
            };
            endpoints.push((resolve(&link.first)?, resolve(&link.second)?));
        }

        Ok(Self {
            nodes,
            links,
            endpoints,
        })
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }

    /// Node indices of every link's `(first, second)` endpoints, in link order.
    pub fn endpoints(&self) -> &[(usize, usize)] {
        &self.endpoints
    }

    pub fn weights(&self) -> Vec<f32> {
        self.links.iter().map(|link| link.weight as f32).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
