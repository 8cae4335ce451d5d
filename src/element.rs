//! Per-frame view state derived from the layout and the graph model.

use eframe::egui::{Pos2, vec2};

use crate::config::{
    MAX_TAIL_PROPORTION_X, MAX_TAIL_PROPORTION_Y, TAIL_LENGTH_X, TAIL_LENGTH_Y, TEXT_MARGIN,
};
use crate::geometry::{Segment, TailShape, arrow_tails};
use crate::graph::{Direction, Graph};

pub const TAIL_SHAPE: TailShape = TailShape {
    length_x: TAIL_LENGTH_X,
    length_y: TAIL_LENGTH_Y,
    max_proportion_x: MAX_TAIL_PROPORTION_X,
    max_proportion_y: MAX_TAIL_PROPORTION_Y,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementStyle {
    #[default]
    Default,
    /// Still in the scene, drawn fully transparent.
    Hidden,
    Selected,
}

impl ElementStyle {
    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }
}

/// A node drawn as a circle with its name above it.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub node: usize,
    pub center: Pos2,
    pub label_anchor: Pos2,
    pub style: ElementStyle,
}

impl Dot {
    fn new(node: usize) -> Self {
        Self {
            node,
            center: Pos2::ZERO,
            label_anchor: Pos2::ZERO,
            style: ElementStyle::Default,
        }
    }

    pub fn update(&mut self, position: Pos2) {
        self.center = position;
        self.label_anchor = position - vec2(0.0, TEXT_MARGIN);
    }

    pub fn show(&mut self) {
        self.style = ElementStyle::Default;
    }

    pub fn hide(&mut self) {
        self.style = ElementStyle::Hidden;
    }

    pub fn select(&mut self) {
        self.style = ElementStyle::Selected;
    }

    pub fn is_visible(&self) -> bool {
        self.style.is_visible()
    }
}

/// A link drawn as a line, plus an arrowhead when it is directed and
/// direction display is enabled.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    pub link: usize,
    pub source: usize,
    pub target: usize,
    pub direction: Option<Direction>,
    pub line: Segment,
    pub tails: Option<[Segment; 2]>,
    pub style: ElementStyle,
}

impl Arrow {
    fn new(link: usize, (source, target): (usize, usize), direction: Option<Direction>) -> Self {
        Self {
            link,
            source,
            target,
            direction,
            line: Segment::default(),
            tails: None,
            style: ElementStyle::Default,
        }
    }

    pub fn update(&mut self, start: Pos2, end: Pos2, directed: bool) {
        self.line = Segment::new(start, end);
        self.tails = match self.direction {
            Some(direction) if directed => Some(arrow_tails(self.line, direction, TAIL_SHAPE)),
            _ => None,
        };
    }

    pub fn show(&mut self) {
        self.style = ElementStyle::Default;
    }

    pub fn hide(&mut self) {
        self.style = ElementStyle::Hidden;
    }

    pub fn select(&mut self) {
        self.style = ElementStyle::Selected;
    }

    pub fn is_visible(&self) -> bool {
        self.style.is_visible()
    }
}

/// Dots index-aligned with graph nodes, arrows index-aligned with links.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub dots: Vec<Dot>,
    pub arrows: Vec<Arrow>,
}

impl Scene {
    pub fn new(graph: &Graph) -> Self {
        let dots = (0..graph.node_count()).map(Dot::new).collect();
        let arrows = graph
            .links()
            .iter()
            .zip(graph.endpoints())
            .enumerate()
            .map(|(index, (link, &endpoints))| Arrow::new(index, endpoints, link.directed_to))
            .collect();

        Self { dots, arrows }
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use crate::graph::GraphLink;

    use super::*;

    fn directed_graph(direction: Option<Direction>) -> Graph {
        Graph::new(
            vec![
                crate::graph::GraphNode {
                    name: "a".to_owned(),
                    url: None,
                },
                crate::graph::GraphNode {
                    name: "b".to_owned(),
                    url: None,
                },
            ],
            vec![GraphLink {
                first: "b".to_owned(),
                second: "a".to_owned(),
                weight: 50,
                directed_to: direction,
                url: None,
            }],
        )
        .unwrap()
    }

    #[test]
    fn scene_is_aligned_with_graph() {
        let scene = Scene::new(&directed_graph(None));
        assert_eq!(scene.dots.len(), 2);
        assert_eq!(scene.dots[1].node, 1);
        assert_eq!(scene.arrows.len(), 1);
        assert_eq!((scene.arrows[0].source, scene.arrows[0].target), (1, 0));
    }

    #[test]
    fn label_sits_above_dot() {
        let mut dot = Dot::new(0);
        dot.update(pos2(40.0, 60.0));
        assert_eq!(dot.center, pos2(40.0, 60.0));
        assert_eq!(dot.label_anchor, pos2(40.0, 60.0 - TEXT_MARGIN));
    }

    #[test]
    fn undirected_arrow_has_no_tails() {
        let mut scene = Scene::new(&directed_graph(None));
        scene.arrows[0].update(pos2(0.0, 0.0), pos2(100.0, 0.0), true);
        assert!(scene.arrows[0].tails.is_none());
    }

    #[test]
    fn directed_arrow_needs_direction_enabled() {
        let mut scene = Scene::new(&directed_graph(Some(Direction::Second)));
        let arrow = &mut scene.arrows[0];

        arrow.update(pos2(0.0, 0.0), pos2(100.0, 0.0), false);
        assert!(arrow.tails.is_none());

        arrow.update(pos2(0.0, 0.0), pos2(100.0, 0.0), true);
        let tails = arrow.tails.expect("tails for a directed arrow");
        assert_eq!(tails[0].end, pos2(100.0, 0.0));
        assert_eq!(tails[1].end, pos2(100.0, 0.0));
    }

    #[test]
    fn hidden_elements_stay_in_place() {
        let mut scene = Scene::new(&directed_graph(None));
        scene.arrows[0].hide();
        scene.dots[0].hide();
        assert_eq!(scene.arrows.len(), 1);
        assert!(!scene.arrows[0].is_visible());
        assert!(!scene.dots[0].is_visible());

        scene.dots[0].select();
        assert!(scene.dots[0].is_visible());
    }
}
