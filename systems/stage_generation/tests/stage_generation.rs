use std::num::NonZeroU32;

use cavern_run_core::{
    ContinuityState, SegmentBehavior, SegmentDescriptor, StageDataError, StagePlan, Surface,
    TerrainKind, PIXELS_PER_TERRAIN_UNIT,
};
use cavern_run_system_stage_generation::{GeneratorConfig, StageGenerator};

fn count(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).expect("count must be non-zero")
}

fn run(length: u32, behavior: SegmentBehavior) -> SegmentDescriptor {
    SegmentDescriptor::continuous(count(length), behavior)
}

fn generator() -> StageGenerator {
    StageGenerator::new(GeneratorConfig::new(0x5eed))
}

fn flat_then_rising_plan() -> StagePlan {
    let profile = vec![run(5, SegmentBehavior::Flat), run(5, SegmentBehavior::Rising)];
    StagePlan::new(
        profile.clone(),
        profile,
        count(10),
        TerrainKind::ContinuousLand,
    )
}

#[test]
fn golden_floor_heights_for_flat_then_rising() {
    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&flat_then_rising_plan(), ContinuityState::new(10, 10))
        .expect("well-formed plan");

    let floor_heights: Vec<i32> = assembled
        .columns()
        .iter()
        .map(|column| column.floor().height())
        .collect();
    assert_eq!(floor_heights, vec![10, 10, 10, 10, 10, 10, 9, 8, 7, 6]);
    // The per-column drift still applies after the final column's emission.
    assert_eq!(assembled.continuity().floor_height(), 5);
}

#[test]
fn ceiling_mirrors_the_flat_then_rising_silhouette() {
    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&flat_then_rising_plan(), ContinuityState::new(10, 10))
        .expect("well-formed plan");

    // The ceiling runs the same descriptors; Rising drifts it upward too, but
    // its boundary pre-correction bumps the first sloped column back by one.
    let ceiling_heights: Vec<i32> = assembled
        .columns()
        .iter()
        .map(|column| column.ceiling().height())
        .collect();
    assert_eq!(ceiling_heights, vec![10, 10, 10, 10, 10, 10, 10, 9, 8, 7]);
    assert_eq!(assembled.continuity().ceiling_height(), 6);
}

#[test]
fn emits_one_cell_per_non_empty_column_in_ascending_order() {
    let profile = vec![
        run(10, SegmentBehavior::Flat),
        run(4, SegmentBehavior::Rising),
        run(6, SegmentBehavior::Empty),
        run(4, SegmentBehavior::Falling),
        run(24, SegmentBehavior::Flat),
    ];
    let plan = StagePlan::new(
        profile.clone(),
        profile,
        count(48),
        TerrainKind::ContinuousLand,
    );

    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&plan, ContinuityState::new(4, 36))
        .expect("well-formed plan");

    assert_eq!(assembled.columns().len(), 48 - 6);
    let mut previous_column = None;
    for column in assembled.columns() {
        assert_eq!(column.ceiling().column(), column.floor().column());
        if let Some(previous) = previous_column {
            assert!(column.floor().column() > previous);
        }
        previous_column = Some(column.floor().column());
    }
}

#[test]
fn column_pixel_x_is_recomputed_from_the_pair_index() {
    let profile = vec![
        run(4, SegmentBehavior::Empty),
        run(44, SegmentBehavior::Flat),
    ];
    let plan = StagePlan::new(
        profile.clone(),
        profile,
        count(48),
        TerrainKind::ContinuousLand,
    );

    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&plan, ContinuityState::new(4, 36))
        .expect("well-formed plan");

    for (index, column) in assembled.columns().iter().enumerate() {
        assert_eq!(column.pixel_x(), index as i32 * PIXELS_PER_TERRAIN_UNIT);
    }
    // The leading empty run shifts cell grid columns away from pair indices.
    let first = &assembled.columns()[0];
    assert_eq!(first.floor().column(), 5);
    assert_eq!(first.pixel_x(), 0);
}

#[test]
fn continuity_feeds_the_next_stage() {
    let mut generator = generator();
    let first = generator
        .assemble_stage(&flat_then_rising_plan(), ContinuityState::new(10, 10))
        .expect("well-formed plan");

    let second = generator
        .assemble_stage(&flat_then_rising_plan(), first.continuity())
        .expect("well-formed plan");

    assert_eq!(
        second.columns()[0].floor().height(),
        first.continuity().floor_height()
    );
    assert_eq!(
        second.columns()[0].ceiling().height(),
        first.continuity().ceiling_height()
    );
    assert_eq!(second.columns()[0].floor().height(), 5);
    assert_eq!(second.columns()[0].ceiling().height(), 6);
}

#[test]
fn fixed_column_first_descriptor_overrides_continuity() {
    let profile = vec![SegmentDescriptor::fixed_column(
        count(10),
        SegmentBehavior::Brick,
        7,
    )];
    let plan = StagePlan::new(
        profile.clone(),
        profile,
        count(10),
        TerrainKind::FixedColumn,
    );

    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&plan, ContinuityState::new(100, 200))
        .expect("well-formed plan");

    assert_eq!(assembled.columns()[0].floor().height(), 7);
    assert_eq!(assembled.columns()[0].ceiling().height(), 7);
}

#[test]
fn mismatched_surfaces_yield_an_empty_stage_with_a_marker() {
    // The floor suppresses two columns that the ceiling keeps.
    let ceiling = vec![run(48, SegmentBehavior::Flat)];
    let floor = vec![
        run(20, SegmentBehavior::Flat),
        run(2, SegmentBehavior::Empty),
        run(26, SegmentBehavior::Falling),
    ];
    let plan = StagePlan::new(ceiling, floor, count(48), TerrainKind::ContinuousLand);

    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&plan, ContinuityState::new(4, 20))
        .expect("well-formed descriptors still elaborate");

    assert!(assembled.columns().is_empty());
    let mismatch = assembled.mismatch().expect("counts disagree");
    assert_eq!(mismatch.ceiling_cells(), 48);
    assert_eq!(mismatch.floor_cells(), 46);
}

#[test]
fn continuity_advances_even_when_the_pairing_is_discarded() {
    let ceiling = vec![run(48, SegmentBehavior::Flat)];
    let floor = vec![
        run(20, SegmentBehavior::Flat),
        run(2, SegmentBehavior::Empty),
        run(26, SegmentBehavior::Falling),
    ];
    let plan = StagePlan::new(ceiling, floor, count(48), TerrainKind::ContinuousLand);

    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&plan, ContinuityState::new(4, 20))
        .expect("well-formed descriptors still elaborate");

    assert!(assembled.mismatch().is_some());
    assert_eq!(assembled.continuity().ceiling_height(), 4);
    assert_ne!(assembled.continuity().floor_height(), 20);
}

#[test]
fn exhausted_descriptors_fail_loudly() {
    let profile = vec![run(3, SegmentBehavior::Flat)];
    let plan = StagePlan::new(
        profile.clone(),
        profile,
        count(10),
        TerrainKind::ContinuousLand,
    );

    let mut generator = generator();
    let error = generator
        .assemble_stage(&plan, ContinuityState::new(4, 36))
        .expect_err("descriptors cover three columns of ten");
    assert_eq!(
        error,
        StageDataError::DescriptorsExhausted {
            surface: Surface::Ceiling,
            column: 3,
        }
    );
}

#[test]
fn boundary_on_the_final_column_is_not_an_exhaustion() {
    // Nine columns of descriptors for a ten-column stage: the cursor reaches
    // the end exactly at the final column and nothing remains to cover.
    let profile = vec![run(4, SegmentBehavior::Flat), run(5, SegmentBehavior::Flat)];
    let plan = StagePlan::new(
        profile.clone(),
        profile,
        count(10),
        TerrainKind::ContinuousLand,
    );

    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&plan, ContinuityState::new(4, 36))
        .expect("final-column boundary is benign");
    assert_eq!(assembled.columns().len(), 10);
}

#[test]
fn empty_profile_is_rejected() {
    let plan = StagePlan::new(
        Vec::new(),
        vec![run(10, SegmentBehavior::Flat)],
        count(10),
        TerrainKind::ContinuousLand,
    );

    let mut generator = generator();
    let error = generator
        .assemble_stage(&plan, ContinuityState::new(4, 36))
        .expect_err("ceiling profile is empty");
    assert_eq!(
        error,
        StageDataError::EmptyProfile {
            surface: Surface::Ceiling,
        }
    );
}

#[test]
fn ceiling_cells_request_mirrored_sprites_and_bricks_request_recoloring() {
    let profile = vec![
        run(24, SegmentBehavior::Flat),
        run(24, SegmentBehavior::Brick),
    ];
    let plan = StagePlan::new(
        profile.clone(),
        profile,
        count(48),
        TerrainKind::ContinuousLand,
    );

    let mut generator = generator();
    let assembled = generator
        .assemble_stage(&plan, ContinuityState::new(4, 36))
        .expect("well-formed plan");

    for column in assembled.columns() {
        assert!(column.ceiling().sprite().mirror_vertical());
        assert!(!column.floor().sprite().mirror_vertical());
        if column.floor().behavior() == SegmentBehavior::Brick {
            assert_eq!(column.floor().sprite().palette_rotation(), Some(0));
        } else {
            assert_eq!(column.floor().sprite().palette_rotation(), None);
        }
    }
}
