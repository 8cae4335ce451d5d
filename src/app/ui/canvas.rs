use eframe::egui::{self, Sense, Ui};

use match_graph::CursorStyle;

use super::super::ViewModel;
use super::super::render_utils::{draw_arrow, draw_background, draw_dot, to_canvas};

impl ViewModel {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(self.canvas, Sense::click());
        let painter = ui.painter_at(rect);

        let mouse = self.visualization.mouse_mut();
        match response.hover_pos() {
            Some(pointer) => mouse.move_to(to_canvas(rect, pointer)),
            None => mouse.leave(),
        }
        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            mouse.press(to_canvas(rect, pointer));
        }

        let report = if self.live_layout {
            self.visualization.tick(&self.params, &mut self.browser)
        } else {
            self.visualization.refresh(&self.params, &mut self.browser)
        };

        if report.cursor == CursorStyle::Pointer {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        draw_background(&painter, rect);
        let scene = self.visualization.scene();
        for arrow in &scene.arrows {
            draw_arrow(&painter, rect, arrow);
        }
        let nodes = self.visualization.graph().nodes();
        for dot in &scene.dots {
            let label = nodes.get(dot.node).map_or("", |node| node.name.as_str());
            draw_dot(&painter, rect, dot, label);
        }

        self.last_report = report;
        ui.ctx().request_repaint();
    }
}
