use eframe::egui::Pos2;

use crate::config::TRIGGER_DISTANCE;
use crate::element::{Arrow, Dot, Scene};
use crate::geometry::{distance_to_infinite_line, within_segment_bounds};

/// The element under the cursor, by its index in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Dot(usize),
    Arrow(usize),
}

fn dot_distance(dot: &Dot, point: Pos2) -> Option<f32> {
    let distance = dot.center.distance(point);
    (distance < TRIGGER_DISTANCE).then_some(distance)
}

fn arrow_distance(arrow: &Arrow, point: Pos2) -> Option<f32> {
    let distance = distance_to_infinite_line(arrow.line, point);
    (distance < TRIGGER_DISTANCE && within_segment_bounds(point, arrow.line)).then_some(distance)
}

/// Nearest visible element within trigger distance. Dots win over arrows;
/// equal distances go to the element that comes first in the graph.
pub fn closest_target(scene: &Scene, point: Pos2) -> Option<(HitTarget, f32)> {
    let closest_dot = scene
        .dots
        .iter()
        .enumerate()
        .filter(|(_, dot)| dot.is_visible())
        .filter_map(|(index, dot)| dot_distance(dot, point).map(|distance| (index, distance)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    if let Some((index, distance)) = closest_dot {
        return Some((HitTarget::Dot(index), distance));
    }

    scene
        .arrows
        .iter()
        .enumerate()
        .filter(|(_, arrow)| arrow.is_visible())
        .filter_map(|(index, arrow)| {
            arrow_distance(arrow, point).map(|distance| (index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, distance)| (HitTarget::Arrow(index), distance))
}

/// Whether `point` is close enough to `target` to count as hitting it.
pub fn target_accepts(scene: &Scene, target: HitTarget, point: Pos2) -> bool {
    match target {
        HitTarget::Dot(index) => scene
            .dots
            .get(index)
            .and_then(|dot| dot_distance(dot, point))
            .is_some(),
        HitTarget::Arrow(index) => scene
            .arrows
            .get(index)
            .and_then(|arrow| arrow_distance(arrow, point))
            .is_some(),
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use crate::element::ElementStyle;
    use crate::geometry::Segment;

    use super::*;

    fn dot(node: usize, x: f32, y: f32) -> Dot {
        Dot {
            node,
            center: pos2(x, y),
            label_anchor: pos2(x, y - 10.0),
            style: ElementStyle::Default,
        }
    }

    fn arrow(link: usize, start: Pos2, end: Pos2) -> Arrow {
        Arrow {
            link,
            source: 0,
            target: 1,
            direction: None,
            line: Segment::new(start, end),
            tails: None,
            style: ElementStyle::Default,
        }
    }

    #[test]
    fn dots_take_priority_over_arrows() {
        let scene = Scene {
            dots: vec![dot(0, 50.0, 50.0)],
            arrows: vec![arrow(0, pos2(0.0, 45.0), pos2(100.0, 55.0))],
        };

        let (target, distance) = closest_target(&scene, pos2(50.0, 50.0)).unwrap();
        assert_eq!(target, HitTarget::Dot(0));
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn nearest_dot_wins_and_ties_keep_model_order() {
        let scene = Scene {
            dots: vec![dot(0, 10.0, 10.0), dot(1, 16.0, 10.0), dot(2, 13.0, 10.0)],
            arrows: Vec::new(),
        };
        assert_eq!(
            closest_target(&scene, pos2(14.0, 10.0)).map(|hit| hit.0),
            Some(HitTarget::Dot(2))
        );

        let tied = Scene {
            dots: vec![dot(0, 10.0, 10.0), dot(1, 16.0, 10.0)],
            arrows: Vec::new(),
        };
        assert_eq!(
            closest_target(&tied, pos2(13.0, 10.0)).map(|hit| hit.0),
            Some(HitTarget::Dot(0))
        );
    }

    #[test]
    fn arrows_need_bounds_and_distance() {
        let scene = Scene {
            dots: Vec::new(),
            arrows: vec![arrow(0, pos2(0.0, 0.0), pos2(100.0, 100.0))],
        };

        assert_eq!(
            closest_target(&scene, pos2(52.0, 48.0)).map(|hit| hit.0),
            Some(HitTarget::Arrow(0))
        );
        // On the extension of the line but outside the segment's box.
        assert!(closest_target(&scene, pos2(150.0, 150.0)).is_none());
        // Inside the box but too far from the line.
        assert!(closest_target(&scene, pos2(80.0, 20.0)).is_none());
    }

    #[test]
    fn hidden_elements_are_ignored() {
        let mut hidden_dot = dot(0, 50.0, 50.0);
        hidden_dot.style = ElementStyle::Hidden;
        let mut hidden_arrow = arrow(0, pos2(0.0, 0.0), pos2(100.0, 100.0));
        hidden_arrow.style = ElementStyle::Hidden;

        let scene = Scene {
            dots: vec![hidden_dot],
            arrows: vec![hidden_arrow],
        };
        assert!(closest_target(&scene, pos2(50.0, 50.0)).is_none());
    }

    #[test]
    fn acceptance_reuses_proximity_rules() {
        let scene = Scene {
            dots: vec![dot(0, 50.0, 50.0)],
            arrows: vec![arrow(0, pos2(0.0, 0.0), pos2(100.0, 100.0))],
        };

        assert!(target_accepts(&scene, HitTarget::Dot(0), pos2(55.0, 55.0)));
        assert!(!target_accepts(&scene, HitTarget::Dot(0), pos2(70.0, 50.0)));
        assert!(target_accepts(&scene, HitTarget::Arrow(0), pos2(20.0, 22.0)));
        assert!(!target_accepts(&scene, HitTarget::Arrow(0), pos2(120.0, 120.0)));
        assert!(!target_accepts(&scene, HitTarget::Arrow(3), pos2(20.0, 22.0)));
    }
}
