use std::fmt;
use std::path::PathBuf;

use crate::error::LoadError;

use super::model::Graph;

/// Where a graph payload is fetched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphSource {
    File(PathBuf),
    Url(String),
}

impl GraphSource {
    /// `http://` and `https://` locations are fetched over the network,
    /// anything else is read from disk.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn fetch(&self) -> Result<String, LoadError> {
        match self {
            Self::File(path) => {
                std::fs::read_to_string(path).map_err(|error| LoadError::Unreachable {
                    location: self.to_string(),
                    message: error.to_string(),
                })
            }
            Self::Url(url) => match ureq::get(url).call() {
                Ok(response) => {
                    response
                        .into_string()
                        .map_err(|error| LoadError::Unreachable {
                            location: self.to_string(),
                            message: error.to_string(),
                        })
                }
                Err(ureq::Error::Status(status, _)) => Err(LoadError::BadStatus {
                    location: self.to_string(),
                    status,
                }),
                Err(ureq::Error::Transport(transport)) => Err(LoadError::Unreachable {
                    location: self.to_string(),
                    message: transport.to_string(),
                }),
            },
        }
    }
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Fetches and decodes the graph, reporting which stage failed.
pub fn load_graph(source: Option<&GraphSource>) -> Result<Graph, LoadError> {
    let source = source.ok_or(LoadError::NoSource)?;
    let raw = source.fetch()?;
    let graph = Graph::from_json(&raw)?;
    log::info!(
        "loaded graph from {source}: {} nodes, {} links",
        graph.node_count(),
        graph.link_count()
    );
    Ok(graph)
}
