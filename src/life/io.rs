//! File I/O for seed patterns
//!
//! Two formats are understood:
//! - plaintext: one row per line, `O`, `*` or `1` for live cells, `.` or `0`
//!   for dead ones, lines starting with `!` are comments. Row index is `y`,
//!   column index is `x`.
//! - JSON: an array of `[x, y]` pairs.

use super::cell::{BoundingBox, Cell};
use super::pattern::{BuiltinPattern, PatternSource};
use crate::error::PatternError;
use anyhow::{Context, Result};
use std::path::Path;

/// Pattern file formats, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFormat {
    Plaintext,
    Json,
}

impl PatternFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PatternFormat::Json,
            _ => PatternFormat::Plaintext,
        }
    }
}

/// Load a pattern from a file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Cell>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file: {}", path.display()))?;

    let cells = match PatternFormat::from_path(path) {
        PatternFormat::Plaintext => parse_plaintext(&content).map_err(anyhow::Error::from),
        PatternFormat::Json => parse_json(&content),
    }
    .with_context(|| format!("Failed to parse pattern from file: {}", path.display()))?;

    log::info!("Loaded {} cells from {}", cells.len(), path.display());
    Ok(cells)
}

/// Parse a plaintext pattern
pub fn parse_plaintext(content: &str) -> Result<Vec<Cell>, PatternError> {
    let rows: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(line_idx, line)| (line_idx + 1, line.trim_end()))
        .filter(|(_, line)| !line.starts_with('!'))
        .collect();

    // Leading and trailing blank lines are layout, interior ones are empty rows.
    let first = rows.iter().position(|(_, line)| !line.is_empty());
    let last = rows.iter().rposition(|(_, line)| !line.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Err(PatternError::Empty);
    };

    let mut cells = Vec::new();
    for (y, &(line_no, line)) in rows[first..=last].iter().enumerate() {
        let y = i64::try_from(y).map_err(|_| PatternError::TooLarge(line_no))?;
        for (x, ch) in line.chars().enumerate() {
            match ch {
                'O' | 'o' | '*' | '1' => {
                    let x = i64::try_from(x).map_err(|_| PatternError::TooLarge(line_no))?;
                    cells.push(Cell::new(x, y));
                }
                '.' | '0' | ' ' => {}
                _ => {
                    return Err(PatternError::InvalidCharacter {
                        ch,
                        line: line_no,
                        column: x + 1,
                    })
                }
            }
        }
    }

    Ok(cells)
}

/// Parse a JSON array of `[x, y]` pairs
pub fn parse_json(content: &str) -> Result<Vec<Cell>> {
    serde_json::from_str(content).context("Expected a JSON array of [x, y] pairs")
}

/// Save a pattern, format chosen by the file extension
pub fn save_pattern_to_file<P: AsRef<Path>>(cells: &[Cell], path: P) -> Result<()> {
    let path = path.as_ref();
    let content = match PatternFormat::from_path(path) {
        PatternFormat::Plaintext => pattern_to_string(cells)
            .with_context(|| format!("Cannot write {} as plaintext", path.display()))?,
        PatternFormat::Json => {
            serde_json::to_string_pretty(cells).context("Failed to serialize pattern")?
        }
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write pattern to file: {}", path.display()))?;

    Ok(())
}

/// Largest bounding box, in cells, that [`pattern_to_string`] will draw.
pub const PLAINTEXT_AREA_LIMIT: u64 = 1 << 22;

/// Render cells as plaintext, relative to the top-left of their bounding box.
/// The absolute position is lost. Boards whose bounding box is larger than
/// [`PLAINTEXT_AREA_LIMIT`] are rejected; save those as JSON.
pub fn pattern_to_string(cells: &[Cell]) -> Result<String, PatternError> {
    let Some(bounds) = BoundingBox::of(cells) else {
        return Ok(String::new());
    };
    if bounds.area() > PLAINTEXT_AREA_LIMIT {
        return Err(PatternError::TooSparse {
            width: bounds.width(),
            height: bounds.height(),
            limit: PLAINTEXT_AREA_LIMIT,
        });
    }

    let mut sorted = cells.to_vec();
    sorted.sort_unstable_by_key(|c| (c.y, c.x));
    sorted.dedup();

    let mut result = String::new();
    let mut cursor = sorted.iter().peekable();
    for y in bounds.min.y..=bounds.max.y {
        let mut row = String::with_capacity(bounds.width() as usize);
        for x in bounds.min.x..=bounds.max.x {
            if cursor.next_if(|c| c.x == x && c.y == y).is_some() {
                row.push('O');
            } else {
                row.push('.');
            }
        }
        result.push_str(row.trim_end_matches('.'));
        result.push('\n');
    }

    Ok(result)
}

/// Write every built-in pattern to `output_dir` as `<name>.cells`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for pattern in BuiltinPattern::ALL {
        let path = dir.join(format!("{}.cells", pattern.name()));
        let header = format!("!Name: {}\n!{}\n", pattern.name(), pattern.description());
        let body = pattern_to_string(&pattern.cells()?)?;
        std::fs::write(&path, header + &body)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn as_set(cells: &[Cell]) -> HashSet<Cell> {
        cells.iter().copied().collect()
    }

    /// Shift so the bounding box starts at the origin
    fn normalized(cells: &[Cell]) -> HashSet<Cell> {
        let min = BoundingBox::of(cells).map(|b| b.min).unwrap_or(Cell::ORIGIN);
        cells.iter().map(|c| Cell::new(c.x - min.x, c.y - min.y)).collect()
    }

    #[test]
    fn test_parse_plaintext() {
        let content = "!Name: glider\n.O.\n..O\nOOO\n";
        let cells = parse_plaintext(content).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::new(1, 0),
                Cell::new(2, 1),
                Cell::new(0, 2),
                Cell::new(1, 2),
                Cell::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_parse_plaintext_alternate_symbols() {
        let cells = parse_plaintext("010\n1*1\n\n0o\n").unwrap();
        assert_eq!(
            as_set(&cells),
            as_set(&[
                Cell::new(1, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(1, 3),
            ])
        );
    }

    #[test]
    fn test_parse_plaintext_ragged_rows() {
        let cells = parse_plaintext("O\n..O\n").unwrap();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(2, 1)]);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(
            parse_plaintext(".O.\n.X.\n"),
            Err(PatternError::InvalidCharacter { ch: 'X', line: 2, column: 2 })
        );
        assert_eq!(parse_plaintext(""), Err(PatternError::Empty));
        assert_eq!(parse_plaintext("!only a comment\n\n"), Err(PatternError::Empty));

        assert!(parse_json("[[1, 2], [3]]").is_err());
        assert!(parse_json("{\"x\": 1}").is_err());
    }

    #[test]
    fn test_parse_json() {
        let cells = parse_json("[[0, 0], [-4, 9]]").unwrap();
        assert_eq!(cells, vec![Cell::new(0, 0), Cell::new(-4, 9)]);
    }

    #[test]
    fn test_pattern_to_string() {
        let cells = vec![
            Cell::new(11, 5),
            Cell::new(12, 6),
            Cell::new(10, 7),
            Cell::new(11, 7),
            Cell::new(12, 7),
        ];
        assert_eq!(pattern_to_string(&cells).unwrap(), ".O\n..O\nOOO\n");
        assert_eq!(pattern_to_string(&[]).unwrap(), "");
    }

    #[test]
    fn test_far_apart_cells_refuse_plaintext() {
        let cells = [Cell::new(0, 0), Cell::new(1_000_000_000, 0)];
        assert!(matches!(
            pattern_to_string(&cells),
            Err(PatternError::TooSparse { width: 1_000_000_001, height: 1, .. })
        ));

        let full_range = [Cell::new(i64::MIN, i64::MIN), Cell::new(i64::MAX, i64::MAX)];
        assert!(pattern_to_string(&full_range).is_err());

        let temp_dir = tempdir().unwrap();
        assert!(save_pattern_to_file(&cells, temp_dir.path().join("pair.cells")).is_err());

        let json_path = temp_dir.path().join("pair.json");
        save_pattern_to_file(&cells, &json_path).unwrap();
        assert_eq!(load_pattern_from_file(&json_path).unwrap(), cells.to_vec());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let original = BuiltinPattern::Lwss.cells().unwrap();

        let text_path = temp_dir.path().join("nested/lwss.cells");
        save_pattern_to_file(&original, &text_path).unwrap();
        assert_eq!(as_set(&load_pattern_from_file(&text_path).unwrap()), as_set(&original));

        let shifted: Vec<Cell> = original.iter().map(|c| Cell::new(c.x - 50, c.y + 3)).collect();
        let json_path = temp_dir.path().join("lwss.json");
        save_pattern_to_file(&shifted, &json_path).unwrap();
        assert_eq!(load_pattern_from_file(&json_path).unwrap(), shifted);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        assert!(load_pattern_from_file(temp_dir.path().join("absent.cells")).is_err());
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        for pattern in BuiltinPattern::ALL {
            let path = temp_dir.path().join(format!("{}.cells", pattern.name()));
            let loaded = load_pattern_from_file(&path).unwrap();
            assert_eq!(normalized(&loaded), normalized(&pattern.cells().unwrap()), "{}", pattern);
        }
    }
}
