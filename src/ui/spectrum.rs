use eframe::egui;

use crate::config::{
    BAR_GAP, BASELINE_INSET, BASELINE_OFFSET, HEIGHT_GAIN, LABEL_PADDING, NUM_SEGMENTS,
    PEAK_DECAY, PEAK_MARKER_HEIGHT,
};
use crate::ui::color::ramp_color32;

/// Pixel height for one bin: squared amplitude response scaled to the panel,
/// shifted down by the fixed baseline plus the user's scale offset. Floored
/// at zero, never capped at the panel height.
pub fn bar_height(raw: u8, canvas_height: f32, scale_offset: f32) -> f32 {
    let normalized = raw as f32 / 255.0;
    let scaled =
        normalized * normalized * canvas_height * HEIGHT_GAIN - (BASELINE_OFFSET + scale_offset);
    scaled.max(0.0)
}

/// Snap the marker to just under a rising bar, otherwise let it fall by a
/// constant amount per rendered frame, floored at zero.
pub fn update_peak(peak: f32, scaled_height: f32) -> f32 {
    if scaled_height > peak {
        scaled_height - 1.0
    } else {
        (peak - PEAK_DECAY).max(0.0)
    }
}

pub fn format_khz(freq: f32) -> String {
    format!("{:.1} kHz", freq / 1000.0)
}

pub fn draw_spectrum(
    ui: &mut egui::Ui,
    frame: &[u8],
    peaks: &mut [f32],
    scale_offset: f32,
    sample_rate: u32,
) {
    let available_width = ui.available_width();
    let available_height = ui.available_height();

    let response = ui.allocate_rect(
        egui::Rect::from_min_size(
            ui.min_rect().min,
            egui::vec2(available_width, available_height),
        ),
        egui::Sense::hover(),
    );

    let painter = ui.painter();
    let rect = response.rect;

    // Background
    painter.rect_filled(rect, 0.0, egui::Color32::BLACK);

    if !frame.is_empty() {
        // Bar width tracks the live panel size; never cached across frames
        let bar_width = rect.width() / frame.len() as f32;
        let baseline = rect.bottom() - BASELINE_INSET;
        let mut x = rect.left();

        for (&raw, peak) in frame.iter().zip(peaks.iter_mut()) {
            let scaled_height = bar_height(raw, rect.height(), scale_offset);

            if scaled_height > 0.0 {
                let segment_height = scaled_height / NUM_SEGMENTS as f32;

                for j in 0..NUM_SEGMENTS {
                    let height_percent = j as f32 / NUM_SEGMENTS as f32;
                    let color = ramp_color32(height_percent * (scaled_height / rect.height()));

                    painter.rect_filled(
                        egui::Rect::from_min_size(
                            egui::pos2(x, baseline - segment_height * (j + 1) as f32),
                            egui::vec2(bar_width, segment_height),
                        ),
                        0.0,
                        color,
                    );
                }
            }

            *peak = update_peak(*peak, scaled_height);

            painter.rect_filled(
                egui::Rect::from_min_size(
                    egui::pos2(x, baseline - *peak - PEAK_MARKER_HEIGHT),
                    egui::vec2(bar_width, PEAK_MARKER_HEIGHT),
                ),
                0.0,
                egui::Color32::WHITE,
            );

            x += bar_width + BAR_GAP;
        }
    }

    draw_frequency_labels(painter, rect, sample_rate);
}

fn draw_frequency_labels(painter: &egui::Painter, rect: egui::Rect, sample_rate: u32) {
    let nyquist = sample_rate as f32 / 2.0;
    let frequencies = [
        0.0,
        nyquist / 4.0,
        nyquist / 2.0,
        3.0 * nyquist / 4.0,
        nyquist,
    ];

    let half_padding = LABEL_PADDING / 2.0;
    let positions = [
        rect.left() + half_padding + 5.0,
        rect.left() + rect.width() * 0.25,
        rect.left() + rect.width() * 0.5,
        rect.left() + rect.width() * 0.75,
        rect.right() - half_padding - 5.0,
    ];

    for (freq, x) in frequencies.iter().zip(positions) {
        painter.text(
            egui::pos2(x, rect.bottom() - 5.0),
            egui::Align2::CENTER_BOTTOM,
            format_khz(*freq),
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn silent_bin_clamps_to_zero_height() {
        assert_eq!(bar_height(0, 500.0, 0.0), 0.0);
        assert_eq!(bar_height(0, 500.0, -100.0), 0.0);
    }

    #[test]
    fn full_scale_bin_exceeds_canvas_height() {
        assert_relative_eq!(bar_height(255, 500.0, 0.0), 2350.0);
    }

    #[test]
    fn scale_offset_shifts_the_baseline() {
        let base = bar_height(255, 500.0, 0.0);
        assert_relative_eq!(bar_height(255, 500.0, 50.0), base - 50.0);
        assert_relative_eq!(bar_height(255, 500.0, -50.0), base + 50.0);
    }

    #[test]
    fn quiet_bins_below_the_baseline_are_floored() {
        assert!(bar_height(64, 500.0, 0.0) > 0.0);
        assert_eq!(bar_height(64, 500.0, 50.0), 0.0);
    }

    #[test]
    fn rising_bar_snaps_peak_just_below_its_top() {
        assert_relative_eq!(update_peak(40.0, 50.0), 49.0);
    }

    #[test]
    fn falling_bar_decays_peak_linearly() {
        let mut peak = 80.0;
        peak = update_peak(peak, 50.0);
        assert_relative_eq!(peak, 72.0);
        peak = update_peak(peak, 50.0);
        assert_relative_eq!(peak, 64.0);
    }

    #[test]
    fn peak_decay_floors_at_zero() {
        assert_relative_eq!(update_peak(5.0, 0.0), 0.0);
        assert_relative_eq!(update_peak(0.0, 0.0), 0.0);
    }

    #[test]
    fn labels_format_as_kilohertz() {
        assert_eq!(format_khz(0.0), "0.0 kHz");
        assert_eq!(format_khz(11025.0), "11.0 kHz");
        assert_eq!(format_khz(24000.0), "24.0 kHz");
    }
}
