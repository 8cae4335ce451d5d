use eframe::egui::{self, Key, Response, Ui};

use match_graph::config::{SCALE_RANGE, SHIFT_RANGE, THRESHOLD_RANGE};
use match_graph::NormalizationMode;

use super::super::ViewModel;

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    positive_secs: f32,
    negative_secs: f32,
    carry: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

/// Advances the hold timers for a focused slider and returns the signed
/// amount the arrow keys ask for this frame, or `None` when idle.
fn arrow_key_delta(ui: &Ui, response: &Response, step: f32) -> Option<(f32, SliderKeyHoldState)> {
    let state_id = response.id.with("arrow_key_hold_state");
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });

    if !response.has_focus() {
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, SliderKeyHoldState::default()));
        return None;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    hold_state.positive_secs = if increase_down {
        hold_state.positive_secs + delta_time
    } else {
        0.0
    };
    hold_state.negative_secs = if decrease_down {
        hold_state.negative_secs + delta_time
    } else {
        0.0
    };

    let direction = (increase_down as i8) - (decrease_down as i8);
    if direction == 0 {
        hold_state.carry = 0.0;
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, hold_state));
        return None;
    }

    let hold_secs = if direction > 0 {
        hold_state.positive_secs
    } else {
        hold_state.negative_secs
    };
    let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_secs);
    ui.ctx().request_repaint();
    Some((direction as f32 * step * speed * delta_time, hold_state))
}

fn store_hold_state(ui: &Ui, response: &Response, hold_state: SliderKeyHoldState) {
    let state_id = response.id.with("arrow_key_hold_state");
    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));
}

fn apply_slider_arrow_acceleration_f32(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    range: std::ops::RangeInclusive<f32>,
    step: f32,
) -> bool {
    let Some((delta, hold_state)) = arrow_key_delta(ui, response, step) else {
        return false;
    };

    let old_value = *value;
    *value = (*value + delta).clamp(*range.start(), *range.end());
    store_hold_state(ui, response, hold_state);
    (*value - old_value).abs() > f32::EPSILON
}

fn apply_slider_arrow_acceleration_u32(
    ui: &Ui,
    response: &Response,
    value: &mut u32,
    range: std::ops::RangeInclusive<u32>,
) -> bool {
    let Some((delta, mut hold_state)) = arrow_key_delta(ui, response, 1.0) else {
        return false;
    };

    hold_state.carry += delta;
    let whole_delta = hold_state.carry.trunc() as i64;
    hold_state.carry -= whole_delta as f32;

    let old_value = *value;
    if whole_delta != 0 {
        let next = (i64::from(*value) + whole_delta)
            .clamp(i64::from(*range.start()), i64::from(*range.end()));
        *value = u32::try_from(next).unwrap_or(*range.end());
    }
    store_hold_state(ui, response, hold_state);
    *value != old_value
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        let threshold_slider = ui
            .add(egui::Slider::new(&mut self.params.threshold, THRESHOLD_RANGE).text("Threshold"))
            .on_hover_text("Links at or below this similarity are hidden.");
        if threshold_slider.hovered() {
            threshold_slider.request_focus();
        }
        apply_slider_arrow_acceleration_u32(
            ui,
            &threshold_slider,
            &mut self.params.threshold,
            THRESHOLD_RANGE,
        );

        let scale_slider = ui
            .add(egui::Slider::new(&mut self.params.scale, SCALE_RANGE).text("Scale"))
            .on_hover_text("Target distance of the least similar pair.");
        if scale_slider.hovered() {
            scale_slider.request_focus();
        }
        apply_slider_arrow_acceleration_f32(
            ui,
            &scale_slider,
            &mut self.params.scale,
            SCALE_RANGE,
            1.0,
        );

        let shift_slider = ui
            .add(egui::Slider::new(&mut self.params.shift, SHIFT_RANGE).text("Shift"))
            .on_hover_text("Constant added to every target distance.");
        if shift_slider.hovered() {
            shift_slider.request_focus();
        }
        apply_slider_arrow_acceleration_f32(
            ui,
            &shift_slider,
            &mut self.params.shift,
            SHIFT_RANGE,
            1.0,
        );

        ui.separator();

        ui.label("Normalization")
            .on_hover_text("How link weights are turned into target distances.");
        ui.horizontal_wrapped(|ui| {
            for mode in NormalizationMode::ALL {
                ui.radio_value(&mut self.params.normalization, mode, mode.label());
            }
        });

        ui.separator();

        ui.checkbox(&mut self.params.direction_enabled, "Show direction")
            .on_hover_text("Draw arrowheads on directed links.");
        ui.checkbox(&mut self.params.isolated_nodes_visible, "Show isolated nodes")
            .on_hover_text("Keep nodes whose links are all below the threshold.");
        ui.checkbox(&mut self.live_layout, "Live layout")
            .on_hover_text("Keep the force simulation running.");
    }
}
