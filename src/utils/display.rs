//! Display and output formatting utilities

use crate::config::ViewportConfig;
use crate::life::{BoundingBox, Cell, LifeEngine, LiveSet};

/// Largest bounding box, in cells, that [`BoardFormatter::format_compact`] draws.
pub const COMPACT_AREA_LIMIT: u64 = 1 << 16;

/// Format boards for terminal output
pub struct BoardFormatter;

impl BoardFormatter {
    /// Draw the part of the board inside `viewport`, centered on `focus`.
    /// Row `y` increases downward.
    pub fn format_viewport(live: &LiveSet, focus: Cell, viewport: ViewportConfig) -> String {
        let left = focus.x.saturating_sub(i64::from(viewport.width / 2));
        let top = focus.y.saturating_sub(i64::from(viewport.height / 2));

        let row_bytes = (viewport.width as usize + 1) * '█'.len_utf8();
        let mut output = String::with_capacity(row_bytes * viewport.height as usize);
        for row in 0..i64::from(viewport.height) {
            for col in 0..i64::from(viewport.width) {
                // off the edge of the coordinate space
                let Some(cell) = focus_offset(left, top, col, row) else {
                    output.push(' ');
                    continue;
                };
                output.push(if live.contains(&cell) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Draw exactly the bounding box of the live cells. Boards whose bounding
    /// box is larger than [`COMPACT_AREA_LIMIT`] are listed cell by cell instead.
    pub fn format_compact(live: &LiveSet) -> String {
        let Some(bounds) = BoundingBox::of(live) else {
            return String::from("(empty)\n");
        };
        if bounds.area() > COMPACT_AREA_LIMIT {
            return Self::format_cell_list(live, bounds);
        }

        let mut output = String::new();
        for y in bounds.min.y..=bounds.max.y {
            for x in bounds.min.x..=bounds.max.x {
                output.push(if live.contains(&Cell::new(x, y)) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// One sorted cell per line under a summary of the bounds
    fn format_cell_list(live: &LiveSet, bounds: BoundingBox) -> String {
        let mut cells: Vec<Cell> = live.iter().copied().collect();
        cells.sort_unstable_by_key(|c| (c.y, c.x));

        let mut output = format!(
            "{} live cells spread over {}x{}, listed instead of drawn:\n",
            cells.len(),
            bounds.width(),
            bounds.height()
        );
        for cell in cells {
            output.push_str(&format!("  {}\n", cell));
        }
        output
    }

    /// One-line generation header
    pub fn format_header(engine: &LifeEngine) -> String {
        let bounds = match engine.bounding_box() {
            Some(b) => format!("{} to {}", b.min, b.max),
            None => "-".to_string(),
        };
        format!(
            "Generation: {}  Population: {}  Bounds: {}",
            engine.generation(),
            engine.population(),
            bounds
        )
    }

    /// Full terminal frame: clear screen, header, viewport
    pub fn format_frame(engine: &LifeEngine, viewport: ViewportConfig, show_stats: bool) -> String {
        let mut frame = String::from("\x1b[H\x1b[J");
        if show_stats {
            frame.push_str(&Self::format_header(engine));
            frame.push_str("\n\n");
        }
        frame.push_str(&Self::format_viewport(engine.live_cells(), Cell::ORIGIN, viewport));
        frame
    }
}

fn focus_offset(left: i64, top: i64, col: i64, row: i64) -> Option<Cell> {
    Some(Cell::new(left.checked_add(col)?, top.checked_add(row)?))
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
