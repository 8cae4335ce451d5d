mod app;

use anyhow::anyhow;
use clap::Parser;
use eframe::egui::vec2;

use match_graph::config::{
    CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_SCALE, DEFAULT_SHIFT, DEFAULT_THRESHOLD,
};
use match_graph::{GraphSource, LiveParameters, NormalizationMode};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph JSON file or http(s) URL.
    #[arg(long, env = "MATCH_GRAPH_URL")]
    graph: Option<String>,
    #[arg(long, default_value_t = CANVAS_WIDTH)]
    width: f32,
    #[arg(long, default_value_t = CANVAS_HEIGHT)]
    height: f32,
    /// Links at or below this weight start hidden.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, value_parser = clap::value_parser!(u32).range(0..=100))]
    threshold: u32,
    #[arg(long, default_value_t = DEFAULT_SCALE)]
    scale: f32,
    #[arg(long, default_value_t = DEFAULT_SHIFT)]
    shift: f32,
    #[arg(long, value_enum, default_value_t = NormalizationMode::None)]
    normalization: NormalizationMode,
    /// Draw arrowheads on directed links from the start.
    #[arg(long)]
    directed: bool,
    /// Hide nodes without any visible link.
    #[arg(long)]
    hide_isolated: bool,
}

impl Args {
    fn startup(&self) -> app::StartupOptions {
        app::StartupOptions {
            canvas: vec2(self.width, self.height),
            params: LiveParameters {
                threshold: self.threshold,
                scale: self.scale,
                shift: self.shift,
                normalization: self.normalization,
                direction_enabled: self.directed,
                isolated_nodes_visible: !self.hide_isolated,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let source = args.graph.as_deref().map(GraphSource::parse);
    let startup = args.startup();
    match &source {
        Some(source) => log::info!("graph source: {source}"),
        None => log::warn!("no graph source given"),
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([startup.canvas.x + 340.0, startup.canvas.y + 120.0]),
        ..Default::default()
    };

    eframe::run_native(
        "match-graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::GraphApp::new(cc, source, startup)))),
    )
    .map_err(|error| anyhow!("failed to start the viewer: {error}"))
}
