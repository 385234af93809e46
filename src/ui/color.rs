use eframe::egui;

// Ramp anchors, low to high
pub const RAMP_BLUE: [i32; 3] = [50, 50, 200];
pub const RAMP_GREEN: [i32; 3] = [50, 200, 50];
pub const RAMP_YELLOW: [i32; 3] = [200, 200, 50];
pub const RAMP_RED: [i32; 3] = [200, 50, 50];

pub fn interpolate_color(from: [i32; 3], to: [i32; 3], factor: f32) -> [i32; 3] {
    let mut result = [0i32; 3];
    for (i, channel) in result.iter_mut().enumerate() {
        *channel = (from[i] as f32 + factor * (to[i] - from[i]) as f32).round() as i32;
    }
    result
}

/// Piecewise-linear ramp over four equal bands. Every fraction above 0.75
/// resolves to solid red; negative fractions extrapolate below blue without
/// clamping. Channels leave the 0-255 range arithmetically and are only
/// clamped by [`ramp_color32`] at draw time.
pub fn color_at(fraction: f32) -> [i32; 3] {
    if fraction <= 0.25 {
        interpolate_color(RAMP_BLUE, RAMP_GREEN, fraction / 0.25)
    } else if fraction <= 0.5 {
        interpolate_color(RAMP_GREEN, RAMP_YELLOW, (fraction - 0.25) / 0.25)
    } else if fraction <= 0.75 {
        interpolate_color(RAMP_YELLOW, RAMP_RED, (fraction - 0.5) / 0.25)
    } else {
        interpolate_color(RAMP_RED, RAMP_RED, 1.0)
    }
}

pub fn ramp_color32(fraction: f32) -> egui::Color32 {
    let [r, g, b] = color_at(fraction);
    egui::Color32::from_rgb(
        r.clamp(0, 255) as u8,
        g.clamp(0, 255) as u8,
        b.clamp(0, 255) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_sit_on_band_boundaries() {
        assert_eq!(color_at(0.0), RAMP_BLUE);
        assert_eq!(color_at(0.25), RAMP_GREEN);
        assert_eq!(color_at(0.5), RAMP_YELLOW);
        assert_eq!(color_at(0.75), RAMP_RED);
    }

    #[test]
    fn first_band_interpolates_blue_to_green() {
        assert_eq!(color_at(0.125), [50, 125, 125]);
    }

    #[test]
    fn fractions_above_three_quarters_are_solid_red() {
        for f in [0.76, 1.0, 5.0, 100.0] {
            assert_eq!(color_at(f), RAMP_RED);
        }
    }

    #[test]
    fn negative_fractions_extrapolate_without_clamping() {
        assert_eq!(color_at(-0.25), [50, -100, 350]);
    }

    #[test]
    fn draw_color_clamps_channels_into_byte_range() {
        assert_eq!(ramp_color32(-0.25), egui::Color32::from_rgb(50, 0, 255));
        assert_eq!(ramp_color32(0.75), egui::Color32::from_rgb(200, 50, 50));
    }
}
