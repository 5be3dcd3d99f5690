//! Plotters-powered risk dial widget for Ratatui.
//!
//! A half circle from 0% (left) to 100% (right), coloured green to red, with a
//! needle at the reported probability. Rendered into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use std::f64::consts::PI;

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::report::{Gauge, gauge_rgb};

/// Arc segments per dial; fine enough to look continuous in a terminal.
const SEGMENTS: usize = 60;
const ARC_RADII: [f64; 3] = [0.88, 0.94, 1.0];
const NEEDLE_LENGTH: f64 = 0.8;

pub struct GaugeDial<'a> {
    pub gauge: &'a Gauge,
}

/// Point on the dial for `position` in `[0, 1]` at `radius`.
pub fn dial_point(position: f64, radius: f64) -> (f64, f64) {
    let angle = PI * (1.0 - position.clamp(0.0, 1.0));
    (radius * angle.cos(), radius * angle.sin())
}

impl Widget for GaugeDial<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 16 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Dial area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let position = self.gauge.position;
        let (nr, ng, nb) = self.gauge.rgb();

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .build_cartesian_2d(-1.1_f64..1.1_f64, -0.1_f64..1.1_f64)?;

            for i in 0..SEGMENTS {
                let a = i as f64 / SEGMENTS as f64;
                let b = (i + 1) as f64 / SEGMENTS as f64;
                let (r, g, bl) = gauge_rgb((a + b) / 2.0);
                let color = RGBColor(r, g, bl);
                for radius in ARC_RADII {
                    chart.draw_series(LineSeries::new([dial_point(a, radius), dial_point(b, radius)], &color))?;
                }
            }

            // Band boundaries.
            for split in [1.0 / 3.0, 2.0 / 3.0] {
                chart.draw_series(LineSeries::new(
                    [dial_point(split, 0.8), dial_point(split, 1.05)],
                    &WHITE,
                ))?;
            }

            let needle = RGBColor(nr, ng, nb);
            chart.draw_series(LineSeries::new([(0.0, 0.0), dial_point(position, NEEDLE_LENGTH)], &needle))?;
            chart.draw_series(std::iter::once(Pixel::new((0.0, 0.0), WHITE)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
