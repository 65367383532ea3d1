#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cavern Run engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the pure stage generation system. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for observers to react to deterministically. The terrain data model —
//! segment descriptors in, positioned stage columns out — lives here so that
//! every crate speaks the same vocabulary.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Cavern Run.";

/// Side length of one terrain grid unit expressed in pixels.
///
/// Shared by the generator (hit-boxes), the rendering adapters (sprite
/// placement), and the collision subsystem so that all three agree on where a
/// grid cell sits on screen.
pub const PIXELS_PER_TERRAIN_UNIT: i32 = 16;

/// Label used when deriving the sprite-variety draw stream for a stage.
pub const RNG_STREAM_SPRITES: &str = "sprite-variants";

/// Slope and texture category of one terrain segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentBehavior {
    /// Level terrain holding its height.
    Flat,
    /// Terrain climbing toward the top of the screen, one unit per column.
    Rising,
    /// Terrain descending toward the bottom of the screen, one unit per column.
    Falling,
    /// A single-peak cliff capping a climb.
    Summit,
    /// A man-made brick barrier.
    Brick,
    /// No terrain at all; the column stays open.
    Empty,
}

/// Selects whether a segment's height is computed or dictated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainKind {
    /// Heights flow from the previous segment and the per-column drift rules.
    ContinuousLand,
    /// The segment's first column is pinned to an authored height.
    FixedColumn,
}

/// One of the two vertical boundaries of the playable corridor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    /// The upper boundary; its cells render vertically mirrored.
    Ceiling,
    /// The lower boundary.
    Floor,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ceiling => write!(f, "ceiling"),
            Self::Floor => write!(f, "floor"),
        }
    }
}

/// Describes one run of terrain sharing a single behavior.
///
/// Lengths are column counts, not absolute positions; a profile is a
/// non-empty ordered sequence of descriptors consumed sequentially by the
/// surface elaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    length: NonZeroU32,
    behavior: SegmentBehavior,
    kind: TerrainKind,
    fixed_height: Option<i32>,
}

impl SegmentDescriptor {
    /// Creates a descriptor whose heights flow from its predecessor.
    #[must_use]
    pub const fn continuous(length: NonZeroU32, behavior: SegmentBehavior) -> Self {
        Self {
            length,
            behavior,
            kind: TerrainKind::ContinuousLand,
            fixed_height: None,
        }
    }

    /// Creates a descriptor whose first column is pinned to `height`.
    #[must_use]
    pub const fn fixed_column(
        length: NonZeroU32,
        behavior: SegmentBehavior,
        height: i32,
    ) -> Self {
        Self {
            length,
            behavior,
            kind: TerrainKind::FixedColumn,
            fixed_height: Some(height),
        }
    }

    /// Number of columns this segment spans.
    #[must_use]
    pub const fn length(&self) -> NonZeroU32 {
        self.length
    }

    /// Slope and texture category governing the segment.
    #[must_use]
    pub const fn behavior(&self) -> SegmentBehavior {
        self.behavior
    }

    /// Whether the segment's height is computed or dictated.
    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    /// Authored height pinning the segment's first column, if any.
    #[must_use]
    pub const fn fixed_height(&self) -> Option<i32> {
        self.fixed_height
    }
}

/// Concrete visual variant resolved by rendering backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKey {
    /// Common grassy top used for level ground.
    FlatTop,
    /// Rarer eroded gorge used to break up long flats.
    Gorge,
    /// Crown-shaped rising slope.
    CrownRise,
    /// Plain rising slope.
    StandardRise,
    /// Boot-shaped rising slope.
    BootRise,
    /// Rounded rising slope.
    RoundRise,
    /// Crown-shaped falling slope.
    CrownFall,
    /// Plain falling slope.
    StandardFall,
    /// Boot-shaped falling slope.
    BootFall,
    /// Rounded falling slope.
    RoundFall,
    /// Triangular cliff capping a summit.
    TriangleCliff,
    /// Brick wall tile used for man-made barriers.
    BrickWall,
}

/// Opaque sprite handle handed to the rendering collaborator.
///
/// The generator never touches pixel data; it names a [`SpriteKey`] and the
/// transforms the backend should apply when resolving it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteRequest {
    key: SpriteKey,
    mirror_vertical: bool,
    palette_rotation: Option<u8>,
}

impl SpriteRequest {
    /// Creates a request for the variant drawn as authored.
    #[must_use]
    pub const fn upright(key: SpriteKey) -> Self {
        Self {
            key,
            mirror_vertical: false,
            palette_rotation: None,
        }
    }

    /// Requests the vertically mirrored rendering of the variant.
    #[must_use]
    pub const fn with_vertical_mirror(mut self) -> Self {
        self.mirror_vertical = true;
        self
    }

    /// Requests a recolor pass rotating the palette from `index`.
    #[must_use]
    pub const fn with_palette_rotation(mut self, index: u8) -> Self {
        self.palette_rotation = Some(index);
        self
    }

    /// Visual variant to resolve.
    #[must_use]
    pub const fn key(&self) -> SpriteKey {
        self.key
    }

    /// Whether the backend should flip the image vertically.
    #[must_use]
    pub const fn mirror_vertical(&self) -> bool {
        self.mirror_vertical
    }

    /// Palette index to rotate the image colors from, if any.
    #[must_use]
    pub const fn palette_rotation(&self) -> Option<u8> {
        self.palette_rotation
    }
}

/// Axis-aligned hit-box expressed in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

impl PixelRect {
    /// Creates a new rectangle anchored at its top-left corner.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge of the rectangle.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge of the rectangle.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Width of the rectangle in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the rectangle contains the provided pixel.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + self.width as i32
            && y < self.y + self.height as i32
    }
}

/// One rendered, collidable unit of terrain at a single column.
///
/// Cells are created once by the surface elaborator and never mutated; the
/// stage column that pairs them owns them afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainCell {
    column: u32,
    height: i32,
    sprite: SpriteRequest,
    kind: TerrainKind,
    behavior: SegmentBehavior,
}

impl TerrainCell {
    /// Creates a new terrain cell at the provided grid position.
    #[must_use]
    pub const fn new(
        column: u32,
        height: i32,
        sprite: SpriteRequest,
        kind: TerrainKind,
        behavior: SegmentBehavior,
    ) -> Self {
        Self {
            column,
            height,
            sprite,
            kind,
            behavior,
        }
    }

    /// Zero-based grid column of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Grid height of the cell.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Sprite handle the rendering collaborator should resolve.
    #[must_use]
    pub const fn sprite(&self) -> SpriteRequest {
        self.sprite
    }

    /// Terrain kind of the stage the cell belongs to.
    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    /// Behavior of the segment the cell was emitted from.
    #[must_use]
    pub const fn behavior(&self) -> SegmentBehavior {
        self.behavior
    }

    /// Horizontal pixel position of the cell.
    #[must_use]
    pub const fn pixel_x(&self) -> i32 {
        self.column as i32 * PIXELS_PER_TERRAIN_UNIT
    }

    /// Vertical pixel position of the cell.
    #[must_use]
    pub const fn pixel_y(&self) -> i32 {
        self.height * PIXELS_PER_TERRAIN_UNIT
    }

    /// Hit-box used by the collision subsystem.
    #[must_use]
    pub const fn hit_box(&self) -> PixelRect {
        PixelRect::new(
            self.pixel_x(),
            self.pixel_y(),
            PIXELS_PER_TERRAIN_UNIT as u32,
            PIXELS_PER_TERRAIN_UNIT as u32,
        )
    }
}

/// Paired ceiling and floor cells at one horizontal position.
///
/// The unit consumed by rendering and collision. Its pixel `x` is recomputed
/// from the pair's index within the stage rather than taken from the cells,
/// so stages containing open columns stay densely packed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageColumn {
    ceiling: TerrainCell,
    floor: TerrainCell,
    pixel_x: i32,
    kind: TerrainKind,
}

impl StageColumn {
    /// Creates a new stage column from an elaborated cell pair.
    #[must_use]
    pub const fn new(
        ceiling: TerrainCell,
        floor: TerrainCell,
        pixel_x: i32,
        kind: TerrainKind,
    ) -> Self {
        Self {
            ceiling,
            floor,
            pixel_x,
            kind,
        }
    }

    /// Ceiling cell of the column.
    #[must_use]
    pub const fn ceiling(&self) -> &TerrainCell {
        &self.ceiling
    }

    /// Floor cell of the column.
    #[must_use]
    pub const fn floor(&self) -> &TerrainCell {
        &self.floor
    }

    /// Horizontal pixel position of the column.
    #[must_use]
    pub const fn pixel_x(&self) -> i32 {
        self.pixel_x
    }

    /// Terrain kind of the stage the column belongs to.
    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }
}

/// Carried-over heights bridging consecutive stage generations.
///
/// The generator reads the state once per surface elaboration and returns the
/// advanced state; the caller owns persistence across stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinuityState {
    ceiling_height: i32,
    floor_height: i32,
}

impl ContinuityState {
    /// Creates a new continuity state from explicit surface heights.
    #[must_use]
    pub const fn new(ceiling_height: i32, floor_height: i32) -> Self {
        Self {
            ceiling_height,
            floor_height,
        }
    }

    /// Height the ceiling profile ended on.
    #[must_use]
    pub const fn ceiling_height(&self) -> i32 {
        self.ceiling_height
    }

    /// Height the floor profile ended on.
    #[must_use]
    pub const fn floor_height(&self) -> i32 {
        self.floor_height
    }

    /// Returns the state with the ceiling height replaced.
    #[must_use]
    pub const fn with_ceiling_height(self, height: i32) -> Self {
        Self {
            ceiling_height: height,
            floor_height: self.floor_height,
        }
    }

    /// Returns the state with the floor height replaced.
    #[must_use]
    pub const fn with_floor_height(self, height: i32) -> Self {
        Self {
            ceiling_height: self.ceiling_height,
            floor_height: height,
        }
    }
}

/// Complete request for one stage generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePlan {
    ceiling: Vec<SegmentDescriptor>,
    floor: Vec<SegmentDescriptor>,
    column_count: NonZeroU32,
    kind: TerrainKind,
}

impl StagePlan {
    /// Creates a new stage plan from per-surface descriptor sequences.
    #[must_use]
    pub fn new(
        ceiling: Vec<SegmentDescriptor>,
        floor: Vec<SegmentDescriptor>,
        column_count: NonZeroU32,
        kind: TerrainKind,
    ) -> Self {
        Self {
            ceiling,
            floor,
            column_count,
            kind,
        }
    }

    /// Descriptors composing the ceiling profile, in consumption order.
    #[must_use]
    pub fn ceiling(&self) -> &[SegmentDescriptor] {
        &self.ceiling
    }

    /// Descriptors composing the floor profile, in consumption order.
    #[must_use]
    pub fn floor(&self) -> &[SegmentDescriptor] {
        &self.floor
    }

    /// Number of columns the stage spans.
    #[must_use]
    pub const fn column_count(&self) -> NonZeroU32 {
        self.column_count
    }

    /// Terrain kind applied to the stage as a whole.
    #[must_use]
    pub const fn kind(&self) -> TerrainKind {
        self.kind
    }

    /// Descriptors for the requested surface.
    #[must_use]
    pub fn surface(&self, surface: Surface) -> &[SegmentDescriptor] {
        match surface {
            Surface::Ceiling => &self.ceiling,
            Surface::Floor => &self.floor,
        }
    }
}

/// Identifier of one generated stage within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageId(u32);

impl StageId {
    /// Creates a new stage identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Cell-count disagreement between the two elaborated surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceMismatch {
    ceiling_cells: usize,
    floor_cells: usize,
}

impl SurfaceMismatch {
    /// Creates a new mismatch record from the observed cell counts.
    #[must_use]
    pub const fn new(ceiling_cells: usize, floor_cells: usize) -> Self {
        Self {
            ceiling_cells,
            floor_cells,
        }
    }

    /// Number of cells the ceiling elaboration produced.
    #[must_use]
    pub const fn ceiling_cells(&self) -> usize {
        self.ceiling_cells
    }

    /// Number of cells the floor elaboration produced.
    #[must_use]
    pub const fn floor_cells(&self) -> usize {
        self.floor_cells
    }
}

impl fmt::Display for SurfaceMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ceiling produced {} cells, floor produced {}",
            self.ceiling_cells, self.floor_cells
        )
    }
}

/// Errors raised when stage data disagrees with the requested stage length.
///
/// These indicate authoring bugs in the stage data, not recoverable runtime
/// conditions, and are surfaced loudly instead of patched over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum StageDataError {
    /// The profile ran out of descriptors before the stage was covered.
    #[error("{surface} profile ran out of segment descriptors at column {column}")]
    DescriptorsExhausted {
        /// Surface whose descriptor sequence ended early.
        surface: Surface,
        /// Column at which the next descriptor was required.
        column: u32,
    },
    /// The profile contains no descriptors at all.
    #[error("{surface} profile contains no segment descriptors")]
    EmptyProfile {
        /// Surface whose descriptor sequence is empty.
        surface: Surface,
    },
}

/// Reasons a stage load request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum StageRejection {
    /// The two surfaces elaborated to different cell counts.
    #[error("surfaces produced mismatched cell counts: {0}")]
    SurfacesOutOfStep(SurfaceMismatch),
    /// The stage data disagrees with the requested stage length.
    #[error("invalid stage data: {0}")]
    InvalidStageData(#[from] StageDataError),
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Reseeds the stage generator and resets the corridor continuity.
    ConfigureGenerator {
        /// Global seed from which per-stage draw streams are derived.
        seed: u64,
        /// Heights the first stage's profiles start from.
        continuity: ContinuityState,
    },
    /// Requests generation of the next stage from the provided plan.
    LoadStage {
        /// Descriptor sequences and stage length to materialize.
        plan: StagePlan,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the generator was reseeded.
    GeneratorConfigured {
        /// Global seed now in effect.
        seed: u64,
        /// Continuity heights now in effect.
        continuity: ContinuityState,
    },
    /// Confirms that a stage was generated and is ready for presentation.
    StageReady {
        /// Identifier assigned to the generated stage.
        stage: StageId,
        /// Number of stage columns produced.
        columns: usize,
    },
    /// Reports that a stage load request was rejected.
    StageRejected {
        /// Identifier assigned to the rejected stage attempt.
        stage: StageId,
        /// Specific reason the stage was rejected.
        reason: StageRejection,
    },
}
