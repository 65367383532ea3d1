//! Built-in demo stage plans.
//!
//! Stage data normally arrives from the level loader already parsed; these
//! tables stand in for it so the preview binary can exercise the full
//! generation pipeline without touching the filesystem.

use std::num::NonZeroU32;

use cavern_run_core::{
    ContinuityState, SegmentBehavior, SegmentDescriptor, StagePlan, TerrainKind,
};

/// Session seed used when none is provided on the command line.
pub(crate) const DEFAULT_SEED: u64 = 0x5ca2_b1e5;

/// Corridor heights the first demo stage starts from.
pub(crate) const STARTING_CONTINUITY: ContinuityState = ContinuityState::new(4, 36);

const STAGE_COLUMNS: u32 = 48;

/// Returns the demo plan for the given stage index, cycling through the
/// authored set.
pub(crate) fn demo_stage(index: u32) -> StagePlan {
    match index % 3 {
        0 => approach_canyon(),
        1 => brick_gauntlet(),
        _ => open_rift(),
    }
}

fn columns(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).expect("segment length must be non-zero")
}

fn run(length: u32, behavior: SegmentBehavior) -> SegmentDescriptor {
    SegmentDescriptor::continuous(columns(length), behavior)
}

fn pinned(length: u32, behavior: SegmentBehavior, height: i32) -> SegmentDescriptor {
    SegmentDescriptor::fixed_column(columns(length), behavior, height)
}

/// Rolling terrain: a climb to a summit on the floor, gentle ceiling waves.
fn approach_canyon() -> StagePlan {
    let ceiling = vec![
        run(12, SegmentBehavior::Flat),
        run(8, SegmentBehavior::Falling),
        run(8, SegmentBehavior::Flat),
        run(8, SegmentBehavior::Rising),
        run(12, SegmentBehavior::Flat),
    ];
    let floor = vec![
        run(8, SegmentBehavior::Flat),
        run(6, SegmentBehavior::Rising),
        run(2, SegmentBehavior::Summit),
        run(6, SegmentBehavior::Falling),
        run(10, SegmentBehavior::Flat),
        run(6, SegmentBehavior::Rising),
        run(10, SegmentBehavior::Flat),
    ];
    StagePlan::new(
        ceiling,
        floor,
        columns(STAGE_COLUMNS),
        TerrainKind::ContinuousLand,
    )
}

/// Man-made barrier section with brick columns pinned at authored heights.
fn brick_gauntlet() -> StagePlan {
    let ceiling = vec![
        pinned(6, SegmentBehavior::Flat, 4),
        pinned(4, SegmentBehavior::Brick, 10),
        pinned(6, SegmentBehavior::Flat, 4),
        pinned(4, SegmentBehavior::Brick, 12),
        pinned(6, SegmentBehavior::Flat, 4),
        pinned(4, SegmentBehavior::Brick, 10),
        pinned(6, SegmentBehavior::Flat, 4),
        pinned(4, SegmentBehavior::Brick, 14),
        pinned(8, SegmentBehavior::Flat, 4),
    ];
    let floor = vec![
        pinned(6, SegmentBehavior::Flat, 36),
        pinned(4, SegmentBehavior::Brick, 30),
        pinned(6, SegmentBehavior::Flat, 36),
        pinned(4, SegmentBehavior::Brick, 28),
        pinned(6, SegmentBehavior::Flat, 36),
        pinned(4, SegmentBehavior::Brick, 30),
        pinned(6, SegmentBehavior::Flat, 36),
        pinned(4, SegmentBehavior::Brick, 26),
        pinned(8, SegmentBehavior::Flat, 36),
    ];
    StagePlan::new(
        ceiling,
        floor,
        columns(STAGE_COLUMNS),
        TerrainKind::FixedColumn,
    )
}

/// A gap in both surfaces; the open columns are suppressed on each side.
fn open_rift() -> StagePlan {
    let ceiling = vec![
        run(6, SegmentBehavior::Flat),
        run(6, SegmentBehavior::Falling),
        run(6, SegmentBehavior::Empty),
        run(6, SegmentBehavior::Rising),
        run(24, SegmentBehavior::Flat),
    ];
    let floor = vec![
        run(10, SegmentBehavior::Flat),
        run(4, SegmentBehavior::Rising),
        run(6, SegmentBehavior::Empty),
        run(4, SegmentBehavior::Falling),
        run(24, SegmentBehavior::Flat),
    ];
    StagePlan::new(
        ceiling,
        floor,
        columns(STAGE_COLUMNS),
        TerrainKind::ContinuousLand,
    )
}
