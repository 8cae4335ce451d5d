mod hit;
mod mouse;

use eframe::egui::Pos2;
use rand::Rng;

use crate::config::LiveParameters;
use crate::element::Scene;
use crate::graph::Graph;
use crate::layout::{DEFAULT_ALPHA, LINK_FORCE, LayoutEngine, LinkAttraction};
use crate::normalization::Normalization;

pub use hit::{HitTarget, closest_target, target_accepts};
pub use mouse::{Click, Mouse};

/// Opens the page behind a clicked element.
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
}

/// What a frame decided, for the host to act on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub hovered: Option<HitTarget>,
    pub cursor: CursorStyle,
    pub navigated: Option<String>,
}

/// A running visualization: graph, layout, visual elements and mouse state.
///
/// Nothing here is global; the host owns the instance and calls
/// [`Visualization::tick`] once per display frame.
pub struct Visualization {
    graph: Graph,
    weights: Vec<f32>,
    engine: LayoutEngine,
    scene: Scene,
    mouse: Mouse,
}

impl Visualization {
    pub fn new<R: Rng>(graph: Graph, width: f32, height: f32, rng: &mut R) -> Self {
        let engine = LayoutEngine::new(graph.node_count(), width, height, rng);
        Self::with_engine(graph, engine)
    }

    pub fn with_seed(graph: Graph, width: f32, height: f32, seed: u64) -> Self {
        let engine = LayoutEngine::with_seed(graph.node_count(), width, height, seed);
        Self::with_engine(graph, engine)
    }

    fn with_engine(graph: Graph, engine: LayoutEngine) -> Self {
        let mut visualization = Self {
            weights: graph.weights(),
            scene: Scene::new(&graph),
            engine: engine.with_default_forces(),
            mouse: Mouse::default(),
            graph,
        };
        visualization.install_link_force(&LiveParameters::default());
        visualization
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn mouse_mut(&mut self) -> &mut Mouse {
        &mut self.mouse
    }

    /// Advances the layout by one step, then refreshes the view.
    pub fn tick(&mut self, params: &LiveParameters, navigator: &mut dyn Navigator) -> FrameReport {
        self.engine.step(DEFAULT_ALPHA);
        self.refresh(params, navigator)
    }

    /// Refreshes visual elements from the current layout, resolves hover and
    /// clicks, and swaps in a link force built from `params`.
    pub fn refresh(
        &mut self,
        params: &LiveParameters,
        navigator: &mut dyn Navigator,
    ) -> FrameReport {
        self.update_elements(params);

        let mut report = FrameReport::default();
        let hovered = self
            .mouse
            .point()
            .and_then(|point| closest_target(&self.scene, point))
            .map(|(target, _)| target);
        if let Some(target) = hovered {
            match target {
                HitTarget::Dot(index) => self.scene.dots[index].select(),
                HitTarget::Arrow(index) => self.scene.arrows[index].select(),
            }
            report.hovered = Some(target);
            report.cursor = CursorStyle::Pointer;
        }

        // The latch is drained every frame, used or not.
        let click = self.mouse.take_click();
        if let (Some(target), Some(click)) = (hovered, click)
            && target_accepts(&self.scene, target, click.point)
            && let Some(url) = self.target_url(target)
        {
            log::info!("navigating to {url}");
            navigator.navigate(url);
            report.navigated = Some(url.to_owned());
        }

        self.install_link_force(params);
        report
    }

    fn update_elements(&mut self, params: &LiveParameters) {
        let positions = self.engine.nodes();

        for dot in &mut self.scene.dots {
            if let Some(node) = positions.get(dot.node) {
                dot.update(node.position);
            }
            dot.show();
        }

        let links = self.graph.links();
        for arrow in &mut self.scene.arrows {
            if let (Some(source), Some(target)) =
                (positions.get(arrow.source), positions.get(arrow.target))
            {
                arrow.update(source.position, target.position, params.direction_enabled);
            }

            let visible = links
                .get(arrow.link)
                .is_some_and(|link| link.weight > params.threshold);
            if visible {
                arrow.show();
            } else {
                arrow.hide();
            }
        }

        if !params.isolated_nodes_visible {
            let mut active = vec![false; self.scene.dots.len()];
            for arrow in self.scene.arrows.iter().filter(|arrow| arrow.is_visible()) {
                for index in [arrow.source, arrow.target] {
                    if let Some(flag) = active.get_mut(index) {
                        *flag = true;
                    }
                }
            }
            for dot in &mut self.scene.dots {
                if !active.get(dot.node).copied().unwrap_or(false) {
                    dot.hide();
                }
            }
        }
    }

    fn target_url(&self, target: HitTarget) -> Option<&str> {
        match target {
            HitTarget::Dot(index) => {
                let node = self.scene.dots.get(index)?.node;
                self.graph.nodes().get(node)?.url.as_deref()
            }
            HitTarget::Arrow(index) => {
                let link = self.scene.arrows.get(index)?.link;
                self.graph.links().get(link)?.url.as_deref()
            }
        }
    }

    fn install_link_force(&mut self, params: &LiveParameters) {
        let normalization = Normalization::from_mode(params.normalization, params.threshold);
        log::trace!(
            "link force: {normalization:?}, scale {}, shift {}",
            params.scale,
            params.shift
        );
        let force = LinkAttraction::new(
            self.graph.endpoints(),
            &self.weights,
            normalization,
            params.scale,
            params.shift,
        );
        self.engine.replace_force(LINK_FORCE, force);
    }

    /// Current position of the dot drawn for node `index`.
    pub fn dot_center(&self, index: usize) -> Option<Pos2> {
        self.scene.dots.get(index).map(|dot| dot.center)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use crate::config::NormalizationMode;
    use crate::element::ElementStyle;
    use crate::graph::{Direction, GraphLink, GraphNode};

    use super::*;

    impl Navigator for Vec<String> {
        fn navigate(&mut self, url: &str) {
            self.push(url.to_owned());
        }
    }

    fn graph(links: Vec<(&str, &str, u32, Option<Direction>)>) -> Graph {
        let nodes = ["a", "b", "c"]
            .into_iter()
            .map(|name| GraphNode {
                name: name.to_owned(),
                url: Some(format!("https://example.org/{name}")),
            })
            .collect();
        let links = links
            .into_iter()
            .map(|(first, second, weight, directed_to)| GraphLink {
                first: first.to_owned(),
                second: second.to_owned(),
                weight,
                directed_to,
                url: Some(format!("https://example.org/{first}-{second}")),
            })
            .collect();
        Graph::new(nodes, links).unwrap()
    }

    #[test]
    fn threshold_toggles_arrow_visibility() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 80, None)]), 800.0, 500.0, 1);
        let mut navigator = Vec::new();

        let params = LiveParameters {
            threshold: 79,
            ..LiveParameters::default()
        };
        visualization.refresh(&params, &mut navigator);
        assert_eq!(visualization.scene().arrows[0].style, ElementStyle::Default);

        let params = LiveParameters {
            threshold: 80,
            ..LiveParameters::default()
        };
        visualization.refresh(&params, &mut navigator);
        assert_eq!(visualization.scene().arrows[0].style, ElementStyle::Hidden);
    }

    #[test]
    fn hovering_a_dot_selects_it() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 2);
        let mut navigator = Vec::new();
        let params = LiveParameters::default();

        visualization.refresh(&params, &mut navigator);
        let center = visualization.dot_center(1).unwrap();
        visualization.mouse_mut().move_to(center + vec2(2.0, 0.0));

        let report = visualization.refresh(&params, &mut navigator);
        assert_eq!(report.hovered, Some(HitTarget::Dot(1)));
        assert_eq!(report.cursor, CursorStyle::Pointer);
        assert_eq!(visualization.scene().dots[1].style, ElementStyle::Selected);
        assert!(navigator.is_empty());
    }

    #[test]
    fn nothing_hovered_keeps_default_cursor() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 2);
        visualization.mouse_mut().move_to(pos2(-500.0, -500.0));

        let report = visualization.refresh(&LiveParameters::default(), &mut Vec::new());
        assert_eq!(report, FrameReport::default());
    }

    #[test]
    fn cursor_outside_the_canvas_hovers_nothing() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 2);
        let params = LiveParameters::default();
        let mut navigator = Vec::new();

        let report = visualization.refresh(&params, &mut navigator);
        assert_eq!(report, FrameReport::default());

        let center = visualization.dot_center(1).unwrap();
        visualization.mouse_mut().move_to(center);
        assert_eq!(
            visualization.refresh(&params, &mut navigator).cursor,
            CursorStyle::Pointer
        );

        visualization.mouse_mut().leave();
        let report = visualization.refresh(&params, &mut navigator);
        assert_eq!(report.hovered, None);
        assert_eq!(report.cursor, CursorStyle::Default);
        assert_eq!(visualization.scene().dots[1].style, ElementStyle::Default);
    }

    #[test]
    fn click_on_hovered_dot_navigates_once() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 3);
        let mut navigator = Vec::new();
        let params = LiveParameters::default();

        visualization.refresh(&params, &mut navigator);
        let center = visualization.dot_center(0).unwrap();
        visualization.mouse_mut().move_to(center);
        visualization.mouse_mut().press(center);

        let report = visualization.refresh(&params, &mut navigator);
        assert_eq!(report.navigated.as_deref(), Some("https://example.org/a"));

        let report = visualization.refresh(&params, &mut navigator);
        assert_eq!(report.navigated, None);
        assert_eq!(navigator, vec!["https://example.org/a".to_owned()]);
    }

    #[test]
    fn click_without_target_is_discarded() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 4);
        let mut navigator = Vec::new();
        let params = LiveParameters::default();

        visualization.refresh(&params, &mut navigator);
        visualization.mouse_mut().move_to(pos2(-500.0, -500.0));
        visualization.mouse_mut().press(pos2(-500.0, -500.0));
        visualization.refresh(&params, &mut navigator);

        // Moving onto a dot afterwards must not replay the old click.
        let center = visualization.dot_center(0).unwrap();
        visualization.mouse_mut().move_to(center);
        let report = visualization.refresh(&params, &mut navigator);

        assert_eq!(report.hovered, Some(HitTarget::Dot(0)));
        assert_eq!(report.navigated, None);
        assert!(navigator.is_empty());
    }

    #[test]
    fn click_far_from_hovered_element_does_not_navigate() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 5);
        let mut navigator = Vec::new();
        let params = LiveParameters::default();

        visualization.refresh(&params, &mut navigator);
        let center = visualization.dot_center(0).unwrap();
        visualization.mouse_mut().press(center + vec2(40.0, 40.0));
        visualization.mouse_mut().move_to(center);

        let report = visualization.refresh(&params, &mut navigator);
        assert_eq!(report.hovered, Some(HitTarget::Dot(0)));
        assert_eq!(report.navigated, None);
    }

    #[test]
    fn isolated_nodes_can_be_hidden() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 6);
        let params = LiveParameters {
            isolated_nodes_visible: false,
            ..LiveParameters::default()
        };

        visualization.refresh(&params, &mut Vec::new());
        let styles = visualization
            .scene()
            .dots
            .iter()
            .map(|dot| dot.style)
            .collect::<Vec<_>>();
        assert_eq!(
            styles,
            vec![ElementStyle::Default, ElementStyle::Default, ElementStyle::Hidden]
        );
    }

    #[test]
    fn directed_arrows_get_tails_when_enabled() {
        let mut visualization = Visualization::with_seed(
            graph(vec![("a", "b", 90, Some(Direction::First)), ("b", "c", 90, None)]),
            800.0,
            500.0,
            7,
        );
        let params = LiveParameters {
            direction_enabled: true,
            ..LiveParameters::default()
        };
        visualization.refresh(&params, &mut Vec::new());

        let arrows = &visualization.scene().arrows;
        let tails = arrows[0].tails.expect("directed arrow has tails");
        assert_eq!(tails[0].end, arrows[0].line.start);
        assert!(arrows[1].tails.is_none());
    }

    #[test]
    fn ticking_keeps_link_force_registered() {
        let mut visualization =
            Visualization::with_seed(graph(vec![("a", "b", 90, None)]), 800.0, 500.0, 8);
        for mode in NormalizationMode::ALL {
            let params = LiveParameters {
                normalization: mode,
                ..LiveParameters::default()
            };
            visualization.tick(&params, &mut Vec::new());
        }

        let names = visualization.engine().force_names().collect::<Vec<_>>();
        assert_eq!(names.iter().filter(|name| **name == LINK_FORCE).count(), 1);
        for node in visualization.engine().nodes() {
            assert!(node.position.x.is_finite() && node.position.y.is_finite());
        }
    }
}
