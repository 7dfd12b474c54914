use anyhow::{anyhow, ensure, Context, Result};
use std::fs;

use crate::grid::{ObstacleGrid, IMPASSABLE_WEIGHT};

/// Loads a MovingAI `.map` file into an obstacle grid.
pub fn load_map(path: &str) -> Result<ObstacleGrid> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read map file {path}"))?;
    parse_map(&content).with_context(|| format!("malformed map file {path}"))
}

/// Parses the `type` / `height` / `width` / `map` header followed by one line
/// per row. `.` and `G` are free ground, every other glyph blocks the cell.
pub fn parse_map(content: &str) -> Result<ObstacleGrid> {
    let mut lines = content.lines();

    let _type = lines.next().ok_or_else(|| anyhow!("missing type line"))?;
    let height = header_value(lines.next(), "height")?;
    let width = header_value(lines.next(), "width")?;
    let _map = lines.next().ok_or_else(|| anyhow!("missing map line"))?;

    let mut weights = Vec::with_capacity(height);
    for line in lines.take(height) {
        let row: Vec<i32> = line
            .trim_end()
            .chars()
            .map(|ch| match ch {
                '.' | 'G' => 0,
                _ => IMPASSABLE_WEIGHT,
            })
            .collect();
        ensure!(
            row.len() == width,
            "row {} has {} cells, expected {width}",
            weights.len(),
            row.len()
        );
        weights.push(row);
    }
    ensure!(
        weights.len() == height,
        "found {} rows, expected {height}",
        weights.len()
    );

    ObstacleGrid::from_weights(weights)
}

fn header_value(line: Option<&str>, key: &str) -> Result<usize> {
    let line = line.ok_or_else(|| anyhow!("missing {key} line"))?;
    let mut parts = line.split_whitespace();
    ensure!(parts.next() == Some(key), "expected {key} line, got {line:?}");
    parts
        .last()
        .ok_or_else(|| anyhow!("missing value on {key} line"))?
        .parse::<usize>()
        .with_context(|| format!("invalid {key} value"))
}
