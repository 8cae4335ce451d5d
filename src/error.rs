use thiserror::Error;

/// Everything that can stop a graph from reaching the layout engine.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no graph source was configured")]
    NoSource,
    #[error("graph source {location} is unreachable: {message}")]
    Unreachable { location: String, message: String },
    #[error("graph source {location} returned HTTP status {status}")]
    BadStatus { location: String, status: u16 },
    #[error("graph JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("node name {name:?} appears more than once")]
    DuplicateNode { name: String },
    #[error("link #{link} references unknown node {name:?}")]
    UnknownNode { link: usize, name: String },
    #[error("link #{link} has weight {weight}, expected 0..=100")]
    WeightOutOfRange { link: usize, weight: u32 },
}

impl LoadError {
    /// Input errors come from the graph payload itself rather than from
    /// the way it was fetched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_)
                | Self::DuplicateNode { .. }
                | Self::UnknownNode { .. }
                | Self::WeightOutOfRange { .. }
        )
    }
}
