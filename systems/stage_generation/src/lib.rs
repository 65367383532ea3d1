#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic stage terrain generation system.
//!
//! Materializes a [`StagePlan`] — ordered segment descriptors for the ceiling
//! and floor profiles plus a stage length — into positioned, renderable,
//! collidable [`StageColumn`] values. The generator is a pure computation over
//! in-memory data: the only randomized input is the sprite-variety draw
//! stream, which is owned by the generator instance and seeded through
//! [`GeneratorConfig`].

mod sprites;

use cavern_run_core::{
    ContinuityState, SegmentBehavior, SegmentDescriptor, SpriteRequest, StageColumn,
    StageDataError, StageId, StagePlan, Surface, SurfaceMismatch, TerrainCell, TerrainKind,
    PIXELS_PER_TERRAIN_UNIT, RNG_STREAM_SPRITES,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Palette index brick recoloring starts from.
const BRICK_PALETTE_START: u8 = 0;

/// Configuration parameters required to construct the stage generator.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorConfig {
    rng_seed: u64,
}

impl GeneratorConfig {
    /// Creates a new configuration using the provided draw-stream seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }

    /// Derives the configuration for one stage of a seeded session.
    ///
    /// The per-stage seed folds the global seed, the stage identifier, and
    /// the sprite stream label through SHA-256, so any stage can be
    /// regenerated bit-identically without replaying its predecessors.
    #[must_use]
    pub fn for_stage(global_seed: u64, stage: StageId) -> Self {
        Self {
            rng_seed: derive_stage_seed(global_seed, stage),
        }
    }

    /// Seed the generator's draw stream starts from.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Outcome of one stage assembly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledStage {
    columns: Vec<StageColumn>,
    continuity: ContinuityState,
    mismatch: Option<SurfaceMismatch>,
}

impl AssembledStage {
    /// Stage columns in ascending horizontal order.
    ///
    /// Empty when the two surfaces elaborated to different cell counts; see
    /// [`AssembledStage::mismatch`] to distinguish that case from a stage
    /// that is legitimately empty.
    #[must_use]
    pub fn columns(&self) -> &[StageColumn] {
        &self.columns
    }

    /// Consumes the outcome, yielding the stage columns.
    #[must_use]
    pub fn into_columns(self) -> Vec<StageColumn> {
        self.columns
    }

    /// Continuity heights the next stage should start from.
    ///
    /// Advanced even when the column pairing was discarded, so consecutive
    /// stages keep lining up with the silhouette that was computed.
    #[must_use]
    pub const fn continuity(&self) -> ContinuityState {
        self.continuity
    }

    /// Cell-count disagreement that caused the columns to be discarded.
    #[must_use]
    pub const fn mismatch(&self) -> Option<SurfaceMismatch> {
        self.mismatch
    }
}

/// Elaborated cells and carried state for a single surface.
struct ElaboratedSurface {
    cells: Vec<TerrainCell>,
    final_height: i32,
}

/// Stateful generator that materializes stage plans into positioned columns.
#[derive(Debug)]
pub struct StageGenerator {
    rng: ChaCha8Rng,
}

impl StageGenerator {
    /// Creates a new generator using the supplied configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Materializes one stage plan into paired stage columns.
    ///
    /// Elaborates the ceiling profile, then the floor profile, advancing the
    /// continuity height after each. When both surfaces produce the same
    /// number of cells the pairs are zipped into [`StageColumn`] values whose
    /// pixel `x` is recomputed from the pair index. When the counts disagree
    /// the columns are discarded and the outcome carries a
    /// [`SurfaceMismatch`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`StageDataError`] when a profile is empty or runs out of
    /// descriptors before the stage length is covered. Continuity does not
    /// advance on that path.
    pub fn assemble_stage(
        &mut self,
        plan: &StagePlan,
        continuity: ContinuityState,
    ) -> Result<AssembledStage, StageDataError> {
        let ceiling =
            self.elaborate_surface(Surface::Ceiling, plan, continuity.ceiling_height())?;
        let continuity = continuity.with_ceiling_height(ceiling.final_height);

        let floor = self.elaborate_surface(Surface::Floor, plan, continuity.floor_height())?;
        let continuity = continuity.with_floor_height(floor.final_height);

        if ceiling.cells.len() != floor.cells.len() {
            let mismatch = SurfaceMismatch::new(ceiling.cells.len(), floor.cells.len());
            return Ok(AssembledStage {
                columns: Vec::new(),
                continuity,
                mismatch: Some(mismatch),
            });
        }

        let columns = ceiling
            .cells
            .into_iter()
            .zip(floor.cells)
            .enumerate()
            .map(|(index, (ceiling, floor))| {
                StageColumn::new(
                    ceiling,
                    floor,
                    index as i32 * PIXELS_PER_TERRAIN_UNIT,
                    plan.kind(),
                )
            })
            .collect();

        Ok(AssembledStage {
            columns,
            continuity,
            mismatch: None,
        })
    }

    /// Runs the per-column loop for one surface.
    ///
    /// The boundary column's cell is emitted before the descriptor cursor
    /// advances, so it still carries the outgoing segment's behavior and
    /// height.
    fn elaborate_surface(
        &mut self,
        surface: Surface,
        plan: &StagePlan,
        start_height: i32,
    ) -> Result<ElaboratedSurface, StageDataError> {
        let descriptors = plan.surface(surface);
        let first = descriptors
            .first()
            .ok_or(StageDataError::EmptyProfile { surface })?;

        let mut height = match first.kind() {
            TerrainKind::FixedColumn => first.fixed_height().unwrap_or(start_height),
            TerrainKind::ContinuousLand => start_height,
        };
        let mut behavior = first.behavior();
        let mut boundary = first.length().get();
        let mut cursor = 0_usize;

        let column_count = plan.column_count().get();
        let mut cells = Vec::with_capacity(column_count as usize);

        for column in 0..column_count {
            if let Some(key) = sprites::select(behavior, &mut self.rng) {
                let mut sprite = SpriteRequest::upright(key);
                if surface == Surface::Ceiling {
                    sprite = sprite.with_vertical_mirror();
                }
                if behavior == SegmentBehavior::Brick {
                    sprite = sprite.with_palette_rotation(BRICK_PALETTE_START);
                }
                cells.push(TerrainCell::new(column, height, sprite, plan.kind(), behavior));
            }

            if column == boundary {
                cursor += 1;
                match descriptors.get(cursor) {
                    Some(next) => {
                        let previous = behavior;
                        behavior = next.behavior();
                        boundary += next.length().get();
                        height = boundary_height(height, previous, next, surface);
                    }
                    // A boundary landing on the final column has nothing
                    // left to cover, so the missing descriptor is harmless.
                    None if column + 1 == column_count => {}
                    None => {
                        return Err(StageDataError::DescriptorsExhausted { surface, column })
                    }
                }
            }

            height = drift_height(height, behavior, surface);
        }

        Ok(ElaboratedSurface {
            cells,
            final_height: height,
        })
    }
}

/// Computes the height correction applied when crossing a segment boundary.
///
/// A fixed-column descriptor pins the height outright. Otherwise two additive
/// half-corrections align the new segment's first rendered column with where
/// the previous segment left off; both may fire in one transition, in which
/// case they cancel.
fn boundary_height(
    height: i32,
    previous: SegmentBehavior,
    next: &SegmentDescriptor,
    surface: Surface,
) -> i32 {
    if next.kind() == TerrainKind::FixedColumn {
        if let Some(fixed) = next.fixed_height() {
            return fixed;
        }
    }

    let (trigger, step) = match surface {
        Surface::Ceiling => (SegmentBehavior::Rising, -1),
        Surface::Floor => (SegmentBehavior::Falling, 1),
    };

    let mut height = height;
    if next.behavior() == trigger {
        height -= step;
    } else if next.behavior() == SegmentBehavior::Summit && surface == Surface::Ceiling {
        height += 1;
    }

    if previous == trigger {
        height += step;
    } else if previous == SegmentBehavior::Summit {
        height += step;
    }

    height
}

/// Applies the steady per-column ramp for the active behavior.
fn drift_height(height: i32, behavior: SegmentBehavior, surface: Surface) -> i32 {
    match behavior {
        SegmentBehavior::Rising => height - 1,
        SegmentBehavior::Summit if surface == Surface::Floor => height - 1,
        SegmentBehavior::Falling => height + 1,
        SegmentBehavior::Flat
        | SegmentBehavior::Summit
        | SegmentBehavior::Brick
        | SegmentBehavior::Empty => height,
    }
}

fn derive_stage_seed(global_seed: u64, stage: StageId) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(stage.get().to_le_bytes());
    hasher.update(RNG_STREAM_SPRITES.as_bytes());
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    u64::from_le_bytes(bytes)
}
