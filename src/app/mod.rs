use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};

use match_graph::interaction::{FrameReport, Navigator, Visualization};
use match_graph::{Graph, GraphSource, LiveParameters, LoadError, load_graph};

mod render_utils;
mod ui;

type LoadResult = Result<Graph, LoadError>;

/// Start-up values taken from the command line.
#[derive(Clone, Copy, Debug)]
pub struct StartupOptions {
    pub canvas: Vec2,
    pub params: LiveParameters,
}

pub struct GraphApp {
    source: Option<GraphSource>,
    startup: StartupOptions,
    state: AppState,
    reload_rx: Option<Receiver<LoadResult>>,
}

enum AppState {
    Loading { rx: Receiver<LoadResult> },
    Ready(Box<ViewModel>),
    Error(LoadError),
}

struct ViewModel {
    visualization: Visualization,
    params: LiveParameters,
    canvas: Vec2,
    browser: BrowserNavigator,
    last_report: FrameReport,
    live_layout: bool,
}

/// Opens element pages in the system browser.
#[derive(Default)]
struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&mut self, url: &str) {
        if let Err(error) = open::that(url) {
            log::warn!("failed to open {url}: {error}");
        }
    }
}

impl GraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: Option<GraphSource>,
        startup: StartupOptions,
    ) -> Self {
        let state = Self::start_load(source.clone());
        Self {
            source,
            startup,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: Option<GraphSource>) -> Receiver<LoadResult> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_graph(source.as_ref());
            if let Err(error) = &result {
                log::error!("graph load failed: {error}");
            }
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: Option<GraphSource>) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn ready(&self, graph: Graph) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(graph, self.startup)))
    }
}

impl eframe::App for GraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(graph)) => transition = Some(Ok(graph)),
                    Ok(Err(error)) => transition = Some(Err(error)),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err(LoadError::Unreachable {
                            location: self.source_label(),
                            message: "background load worker disconnected".to_owned(),
                        }));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading similarity graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| ui::draw_error(ui, error, &mut retry));
                if retry {
                    self.state = Self::start_load(self.source.clone());
                    return;
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.source.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            log::warn!("background reload worker disconnected");
                        }
                    }
                }
            }
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(graph) => self.ready(graph),
                Err(error) => AppState::Error(error),
            };
        }
    }
}

impl GraphApp {
    fn source_label(&self) -> String {
        self.source
            .as_ref()
            .map_or_else(|| "<none>".to_owned(), ToString::to_string)
    }
}
