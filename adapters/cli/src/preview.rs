//! ASCII projection of generated stages.
//!
//! The terminal stands in for a graphics backend: sprite handles resolve to
//! single glyphs and the corridor is printed row by row. Useful for eyeballing
//! authored stage data without booting a window.

use anyhow::Result;
use cavern_run_core::{SpriteKey, SpriteRequest, StageColumn};
use cavern_run_rendering::SpriteResolver;

/// Glyph-based sprite resolver used by the terminal preview.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct GlyphAtlas;

impl SpriteResolver for GlyphAtlas {
    type Image = char;

    fn resolve(&self, sprite: SpriteRequest) -> Result<char> {
        let glyph = match sprite.key() {
            SpriteKey::FlatTop => '=',
            SpriteKey::Gorge => '~',
            SpriteKey::CrownRise
            | SpriteKey::StandardRise
            | SpriteKey::BootRise
            | SpriteKey::RoundRise => '/',
            SpriteKey::CrownFall
            | SpriteKey::StandardFall
            | SpriteKey::BootFall
            | SpriteKey::RoundFall => '\\',
            SpriteKey::TriangleCliff => '^',
            SpriteKey::BrickWall => '#',
        };
        Ok(glyph)
    }
}

/// Renders the corridor silhouette as one glyph per cell.
///
/// Rows span the height range the stage actually uses; open columns simply
/// leave gaps where their cells were suppressed.
pub(crate) fn render_corridor<R>(columns: &[StageColumn], resolver: &R) -> Result<String>
where
    R: SpriteResolver<Image = char>,
{
    if columns.is_empty() {
        return Ok(String::from("(empty stage)"));
    }

    let mut min_height = i32::MAX;
    let mut max_height = i32::MIN;
    for column in columns {
        for cell in [column.ceiling(), column.floor()] {
            min_height = min_height.min(cell.height());
            max_height = max_height.max(cell.height());
        }
    }

    let rows = (max_height - min_height + 1) as usize;
    let mut grid = vec![vec![' '; columns.len()]; rows];
    for (index, column) in columns.iter().enumerate() {
        let ceiling_row = (column.ceiling().height() - min_height) as usize;
        grid[ceiling_row][index] = resolver.resolve(column.ceiling().sprite())?;
        let floor_row = (column.floor().height() - min_height) as usize;
        grid[floor_row][index] = resolver.resolve(column.floor().sprite())?;
    }

    let mut rendered = String::with_capacity(rows * (columns.len() + 1));
    for row in grid {
        rendered.extend(row);
        rendered.push('\n');
    }
    Ok(rendered)
}
