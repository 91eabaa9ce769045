use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::{constants::PIE_SETTINGS, domain::Slice};

// Draws the planned slices as a donut using half-block cells. Slices carry
// their geometry already; this widget only rasterizes them.
pub struct PieChart<'a> {
    slices: &'a [Slice],
}

impl<'a> PieChart<'a> {
    pub fn new(slices: &'a [Slice]) -> Self {
        Self { slices }
    }
}

fn angle_from_top(cx: f64, cy: f64) -> f64 {
    let degrees = cy.atan2(cx).to_degrees();
    (degrees - PIE_SETTINGS.start_offset_degrees).rem_euclid(360.0)
}

fn slice_color_at(slices: &[Slice], angle: f64) -> Option<Color> {
    for slice in slices {
        if angle >= slice.start_angle && angle < slice.start_angle + slice.sweep_angle {
            return Some(slice.color);
        }
    }
    // Uncovered angles stay blank; a skipped last category leaves a gap.
    None
}

fn in_ring(cx: f64, cy: f64, radius: f64) -> bool {
    let dist = (cx * cx + cy * cy).sqrt();
    dist >= radius * PIE_SETTINGS.inner_fraction && dist <= radius
}

impl Widget for PieChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.slices.is_empty() || area.width < 6 || area.height < 4 {
            return;
        }

        let center_x = area.width as f64 / 2.0;
        let center_y = area.height as f64 / 2.0;
        let radius = (area.width as f64 / PIE_SETTINGS.aspect_ratio)
            .min(area.height as f64)
            / 2.0
            - 0.5;
        if radius < 1.0 {
            return;
        }

        for row in 0..area.height {
            for col in 0..area.width {
                let cx = (col as f64 - center_x) / PIE_SETTINGS.aspect_ratio;

                // Two sub-pixels per cell, top half and bottom half.
                let cy_top = row as f64 - center_y - 0.25;
                let cy_bot = row as f64 - center_y + 0.25;

                let in_top = in_ring(cx, cy_top, radius);
                let in_bot = in_ring(cx, cy_bot, radius);
                if !in_top && !in_bot {
                    continue;
                }

                let cy = row as f64 - center_y;
                let angle = angle_from_top(cx, cy);
                let Some(color) = slice_color_at(self.slices, angle) else {
                    continue;
                };

                let ch = if in_top && in_bot {
                    "█"
                } else if in_top {
                    "▀"
                } else {
                    "▄"
                };
                buf.set_string(area.x + col, area.y + row, ch, Style::default().fg(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use crate::domain::Slice;

    use super::{angle_from_top, slice_color_at};

    #[test]
    fn test_angle_from_top_compass_points() {
        let top = angle_from_top(0.0, -1.0);
        let right = angle_from_top(1.0, 0.0);
        let bottom = angle_from_top(0.0, 1.0);
        let left = angle_from_top(-1.0, 0.0);

        assert!((top - 0.0).abs() < 1e-9);
        assert!((right - 90.0).abs() < 1e-9);
        assert!((bottom - 180.0).abs() < 1e-9);
        assert!((left - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_slice_color_at_picks_matching_slice() {
        let slices = vec![
            Slice {
                start_angle: 0.0,
                sweep_angle: 120.0,
                color: Color::Red,
            },
            Slice {
                start_angle: 120.0,
                sweep_angle: 240.0,
                color: Color::Blue,
            },
        ];

        assert_eq!(slice_color_at(&slices, 10.0), Some(Color::Red));
        assert_eq!(slice_color_at(&slices, 120.0), Some(Color::Blue));
        assert_eq!(slice_color_at(&slices, 359.9), Some(Color::Blue));
    }

    #[test]
    fn test_slice_color_at_gap_returns_none() {
        let slices = vec![Slice {
            start_angle: 0.0,
            sweep_angle: 180.0,
            color: Color::Red,
        }];

        assert_eq!(slice_color_at(&slices, 270.0), None);
    }
}
