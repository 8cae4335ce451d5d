use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use match_graph::config::{
    LINK_SELECTED_STROKE_WIDTH, LINK_STROKE_WIDTH, NODE_RADIUS, NODE_STROKE_WIDTH, TEXT_SIZE,
};
use match_graph::element::{Arrow, Dot, ElementStyle};
use match_graph::geometry::Segment;

const NODE_FILL: Color32 = Color32::from_rgb(31, 119, 180);
const NODE_SELECTED_FILL: Color32 = Color32::from_rgb(204, 255, 102);
const NODE_STROKE: Color32 = Color32::WHITE;
const TEXT_COLOR: Color32 = Color32::BLACK;
const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

fn link_color(style: ElementStyle) -> Color32 {
    match style {
        ElementStyle::Selected => Color32::from_rgba_unmultiplied(204, 255, 102, 128),
        _ => Color32::from_rgba_unmultiplied(211, 211, 211, 128),
    }
}

fn link_stroke(style: ElementStyle) -> Stroke {
    let width = if style == ElementStyle::Selected {
        LINK_SELECTED_STROKE_WIDTH
    } else {
        LINK_STROKE_WIDTH
    };
    Stroke::new(width, link_color(style))
}

/// Canvas coordinates to screen coordinates.
pub(super) fn to_screen(rect: Rect, point: Pos2) -> Pos2 {
    rect.min + point.to_vec2()
}

/// Screen coordinates to canvas coordinates.
pub(super) fn to_canvas(rect: Rect, point: Pos2) -> Pos2 {
    (point - rect.min).to_pos2()
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, CANVAS_BACKGROUND);
}

fn draw_segment(painter: &Painter, rect: Rect, segment: Segment, stroke: Stroke) {
    painter.line_segment(
        [to_screen(rect, segment.start), to_screen(rect, segment.end)],
        stroke,
    );
}

pub(super) fn draw_arrow(painter: &Painter, rect: Rect, arrow: &Arrow) {
    if !arrow.is_visible() {
        return;
    }

    let stroke = link_stroke(arrow.style);
    draw_segment(painter, rect, arrow.line, stroke);
    for tail in arrow.tails.iter().flatten() {
        draw_segment(painter, rect, *tail, stroke);
    }
}

pub(super) fn draw_dot(painter: &Painter, rect: Rect, dot: &Dot, label: &str) {
    if !dot.is_visible() {
        return;
    }

    let fill = if dot.style == ElementStyle::Selected {
        NODE_SELECTED_FILL
    } else {
        NODE_FILL
    };
    painter.circle(
        to_screen(rect, dot.center),
        NODE_RADIUS,
        fill,
        Stroke::new(NODE_STROKE_WIDTH, NODE_STROKE),
    );
    painter.text(
        to_screen(rect, dot.label_anchor),
        Align2::CENTER_BOTTOM,
        label,
        FontId::proportional(TEXT_SIZE),
        TEXT_COLOR,
    );
}

pub(super) fn canvas_size(width: f32, height: f32) -> Vec2 {
    Vec2::new(width.max(1.0), height.max(1.0))
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn canvas_and_screen_coordinates_invert() {
        let rect = Rect::from_min_size(pos2(120.0, 40.0), vec2(800.0, 500.0));
        let point = pos2(33.0, 71.0);
        assert_eq!(to_canvas(rect, to_screen(rect, point)), point);
    }

    #[test]
    fn selected_links_are_wider() {
        assert!(
            link_stroke(ElementStyle::Selected).width > link_stroke(ElementStyle::Default).width
        );
    }
}
