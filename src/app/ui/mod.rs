use eframe::egui::{self, Ui};

use match_graph::LoadError;

mod canvas;
mod controls;
mod panels;

/// Placeholder shown instead of the canvas when the graph could not be loaded.
pub(super) fn draw_error(ui: &mut Ui, error: &LoadError, retry: &mut bool) {
    let (heading, hint) = match error {
        LoadError::NoSource => (
            "No graph to show",
            "Pass --graph <PATH|URL> or set MATCH_GRAPH_URL.",
        ),
        LoadError::Unreachable { .. } => (
            "Graph source is unreachable",
            "Check that the file exists or that the server is up.",
        ),
        LoadError::BadStatus { .. } => (
            "Graph server refused the request",
            "The server answered with an error status.",
        ),
        LoadError::Malformed(_) => (
            "Graph data is malformed",
            "Expected {\"nodes\": [...], \"links\": [...]}.",
        ),
        LoadError::DuplicateNode { .. }
        | LoadError::UnknownNode { .. }
        | LoadError::WeightOutOfRange { .. } => (
            "Graph data is inconsistent",
            "Node names must be unique, links must name existing nodes and weights must be 0..=100.",
        ),
    };

    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.heading(heading);
        ui.add_space(6.0);
        ui.label(error.to_string());
        ui.add_space(4.0);
        ui.weak(hint);
        ui.add_space(10.0);
        let reload = ui.add_enabled(
            !matches!(error, LoadError::NoSource),
            egui::Button::new("Reload"),
        );
        if reload.clicked() {
            *retry = true;
        }
    });
}
