use eframe::egui::{Pos2, Vec2, pos2, vec2};

use crate::graph::Direction;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    pub start: Pos2,
    pub end: Pos2,
}

impl Segment {
    pub fn new(start: Pos2, end: Pos2) -> Self {
        Self { start, end }
    }

    pub fn delta(self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(self) -> f32 {
        self.delta().length()
    }

    pub fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }

    fn anchor(self, direction: Direction) -> Pos2 {
        match direction {
            Direction::First => self.start,
            Direction::Second => self.end,
        }
    }
}

/// Perpendicular distance from `point` to the infinite line through the
/// segment. A point far past either end but close to the extension still
/// measures as close; pair it with [`within_segment_bounds`].
pub fn distance_to_infinite_line(segment: Segment, point: Pos2) -> f32 {
    let Segment { start, end } = segment;
    let a = start.y - end.y;
    let b = end.x - start.x;
    let c = start.x * end.y - start.y * end.x;
    let norm = (a * a + b * b).sqrt();
    if norm <= f32::EPSILON {
        return start.distance(point);
    }
    (a * point.x + b * point.y + c).abs() / norm
}

/// Strict axis-aligned bounding box containment.
pub fn within_segment_bounds(point: Pos2, segment: Segment) -> bool {
    let Segment { start, end } = segment;
    let (x_min, x_max) = (start.x.min(end.x), start.x.max(end.x));
    let (y_min, y_max) = (start.y.min(end.y), start.y.max(end.y));
    point.x > x_min && point.x < x_max && point.y > y_min && point.y < y_max
}

/// Nominal arrowhead size and how far it may shrink on short links.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailShape {
    pub length_x: f32,
    pub length_y: f32,
    pub max_proportion_x: f32,
    pub max_proportion_y: f32,
}

impl TailShape {
    /// Tail extents along (`x`) and across (`y`) a link of `segment_length`.
    pub fn fitted(self, segment_length: f32) -> Vec2 {
        vec2(
            self.length_x.min(segment_length / self.max_proportion_x),
            self.length_y.min(segment_length / self.max_proportion_y),
        )
    }
}

/// Two tail segments forming a "V" arrowhead at the endpoint named by
/// `direction`. Each tail ends at that endpoint.
pub fn arrow_tails(segment: Segment, direction: Direction, shape: TailShape) -> [Segment; 2] {
    let anchor = segment.anchor(direction);
    let length = segment.length();
    if length <= f32::EPSILON {
        return [Segment::new(anchor, anchor); 2];
    }

    let delta = segment.delta();
    let sin = delta.y / length;
    let cos = delta.x / length;

    let fitted = shape.fitted(length);
    let along = match direction {
        Direction::First => fitted.x,
        Direction::Second => -fitted.x,
    };

    let rotate = |x: f32, y: f32| pos2(x * cos - y * sin + anchor.x, x * sin + y * cos + anchor.y);

    [
        Segment::new(rotate(along, fitted.y), anchor),
        Segment::new(rotate(along, -fitted.y), anchor),
    ]
}
