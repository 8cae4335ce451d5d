//! Force-directed viewer for weighted similarity graphs.
//!
//! The library holds everything that does not need a window: graph decoding,
//! weight normalization, the layout engine, hit-testing and the per-frame
//! [`Visualization`] controller. The `match-graph` binary wraps it in an
//! `eframe` host.

pub mod config;
pub mod element;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod layout;
pub mod normalization;

pub use config::{LiveParameters, NormalizationMode};
pub use error::LoadError;
pub use graph::{Graph, GraphSource, load_graph};
pub use interaction::{CursorStyle, FrameReport, HitTarget, Navigator, Visualization};
pub use layout::LayoutEngine;
pub use normalization::Normalization;
