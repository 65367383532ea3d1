#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Cavern Run adapters.
//!
//! The generator emits opaque sprite handles and grid coordinates; this crate
//! projects them into pixel-space presentations and defines the traits a
//! concrete backend implements. Pixel manipulation — vertical mirroring,
//! palette-rotation recoloring, texture lookup — is entirely the backend's
//! responsibility.

use std::time::Duration;

use anyhow::Result as AnyResult;
use cavern_run_core::{
    SpriteRequest, StageColumn, TerrainKind, PIXELS_PER_TERRAIN_UNIT,
};
use glam::Vec2;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// One terrain cell placed in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    /// Top-left corner of the cell in screen pixels.
    pub position: Vec2,
    /// Side length of the square cell in pixels.
    pub size: f32,
    /// Sprite handle the backend should resolve and draw.
    pub sprite: SpriteRequest,
}

impl CellPresentation {
    /// Creates a new cell presentation descriptor.
    #[must_use]
    pub const fn new(position: Vec2, size: f32, sprite: SpriteRequest) -> Self {
        Self {
            position,
            size,
            sprite,
        }
    }
}

/// One stage column placed in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnPresentation {
    /// Horizontal pixel position of the column.
    pub pixel_x: f32,
    /// Ceiling cell of the column.
    pub ceiling: CellPresentation,
    /// Floor cell of the column.
    pub floor: CellPresentation,
    /// Terrain kind forwarded for collision-aware effects.
    pub kind: TerrainKind,
}

impl ColumnPresentation {
    /// Projects one stage column into pixel space.
    #[must_use]
    pub fn from_stage_column(column: &StageColumn) -> Self {
        let size = PIXELS_PER_TERRAIN_UNIT as f32;
        let ceiling = column.ceiling();
        let floor = column.floor();
        Self {
            pixel_x: column.pixel_x() as f32,
            ceiling: CellPresentation::new(
                Vec2::new(ceiling.pixel_x() as f32, ceiling.pixel_y() as f32),
                size,
                ceiling.sprite(),
            ),
            floor: CellPresentation::new(
                Vec2::new(floor.pixel_x() as f32, floor.pixel_y() as f32),
                size,
                floor.sprite(),
            ),
            kind: column.kind(),
        }
    }
}

/// Scene description for one generated corridor.
#[derive(Clone, Debug, PartialEq)]
pub struct CorridorScene {
    /// Columns composing the corridor, in ascending horizontal order.
    pub columns: Vec<ColumnPresentation>,
    /// Side length of a terrain cell in pixels.
    pub cell_size: f32,
}

impl CorridorScene {
    /// Projects the active stage's columns into a renderable scene.
    #[must_use]
    pub fn from_stage_columns(columns: &[StageColumn]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(ColumnPresentation::from_stage_column)
                .collect(),
            cell_size: PIXELS_PER_TERRAIN_UNIT as f32,
        }
    }

    /// Total width of the corridor in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns.len() as f32 * self.cell_size
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: CorridorScene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: CorridorScene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Resolves opaque sprite handles into backend images.
///
/// Implementations own the sprite sheet and the pixel transforms the handle
/// requests: vertical mirroring for ceiling cells and palette rotation for
/// recolored bricks.
pub trait SpriteResolver {
    /// Concrete image type produced by the backend.
    type Image;

    /// Resolves the requested variant with its transforms applied.
    ///
    /// # Errors
    ///
    /// Returns an error when the variant is missing from the backend's sprite
    /// sheet or a transform cannot be applied.
    fn resolve(&self, sprite: SpriteRequest) -> AnyResult<Self::Image>;
}

/// Rendering backend capable of presenting Cavern Run scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and may mutate the scene before it is rendered, allowing adapters to
    /// animate world snapshots deterministically.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut CorridorScene) + 'static;
}
