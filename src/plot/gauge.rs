//! ASCII risk gauge for terminal output.
//!
//! This is intentionally "dumb" (fixed-width bar), optimized for:
//! - quick reading in a terminal or log
//! - deterministic output (helpful for golden tests)
//!
//! Layout:
//! - band separators at 1/3 and 2/3: `|`
//! - filled cells up to the risk position: `#`
//! - the pointer line marks the exact position with `^`

use crate::report::Gauge;

/// Below this width band labels are abbreviated to one letter.
const NARROW_WIDTH: usize = 24;

/// Render a gauge as three lines: band labels, bar, pointer.
pub fn render_ascii_gauge(gauge: &Gauge, width: usize) -> String {
    let width = width.max(12);
    let cut1 = width / 3;
    let cut2 = (2 * width) / 3;

    let filled = (gauge.position * width as f64).round() as usize;
    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for i in 0..width {
        let ch = if i == cut1 || i == cut2 {
            '|'
        } else if i < filled {
            '#'
        } else {
            '.'
        };
        bar.push(ch);
    }
    bar.push(']');

    // Full names need about eight cells per band.
    let names = if width < NARROW_WIDTH { ["L", "M", "H"] } else { ["low", "medium", "high"] };
    let mut labels = vec![' '; width + 2];
    place(&mut labels, 1, names[0]);
    place(&mut labels, cut1 + 2, names[1]);
    place(&mut labels, cut2 + 2, names[2]);
    let labels: String = labels.into_iter().collect();

    let pointer_col = 1 + ((gauge.position * (width - 1) as f64).round() as usize).min(width - 1);
    let pointer = format!("{}^ {:.1}%", " ".repeat(pointer_col), gauge.percent());

    format!("{}\n{bar}\n{pointer}", labels.trim_end())
}

fn place(buf: &mut [char], start: usize, text: &str) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(slot) = buf.get_mut(start + i) {
            *slot = ch;
        }
    }
}
