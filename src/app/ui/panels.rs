use eframe::egui::{self, Align, Context, Layout};

use match_graph::interaction::{FrameReport, HitTarget, Visualization};
use match_graph::Graph;

use super::super::render_utils::canvas_size;
use super::super::{BrowserNavigator, StartupOptions, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(graph: Graph, startup: StartupOptions) -> Self {
        let canvas = canvas_size(startup.canvas.x, startup.canvas.y);
        Self {
            visualization: Visualization::new(graph, canvas.x, canvas.y, &mut rand::rng()),
            params: startup.params,
            canvas,
            browser: BrowserNavigator,
            last_report: FrameReport::default(),
            live_layout: true,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("match-graph");
                    ui.separator();
                    let graph = self.visualization.graph();
                    ui.label(format!("nodes: {}", graph.node_count()));
                    ui.label(format!("links: {}", graph.link_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload graph"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(hover_text) = self.hover_text() {
                            ui.label(hover_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading similarity graph...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_canvas(ui);
            }
        });
    }

    fn hover_text(&self) -> Option<String> {
        let graph = self.visualization.graph();
        match self.last_report.hovered? {
            HitTarget::Dot(index) => graph.nodes().get(index).map(|node| node.name.clone()),
            HitTarget::Arrow(index) => graph
                .links()
                .get(index)
                .map(|link| format!("{} ~ {}: {}%", link.first, link.second, link.weight)),
        }
    }
}
