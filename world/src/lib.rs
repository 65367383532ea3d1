#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Cavern Run.
//!
//! The world owns the corridor continuity, the active stage's columns, and
//! the session seed. Adapters submit [`Command`] values through [`apply`];
//! the world executes them against the stage generation system and broadcasts
//! [`Event`] values describing what happened. Read access goes through the
//! [`query`] module so observers never hold mutable state.

use cavern_run_core::{
    Command, ContinuityState, Event, StageColumn, StageId, StageRejection,
};
use cavern_run_system_stage_generation::{GeneratorConfig, StageGenerator};

const DEFAULT_SESSION_SEED: u64 = 0x6c1a_93d2_0b47_55e9;
const DEFAULT_CEILING_HEIGHT: i32 = 4;
const DEFAULT_FLOOR_HEIGHT: i32 = 36;

/// Authoritative state for one Cavern Run session.
#[derive(Debug)]
pub struct World {
    session_seed: u64,
    continuity: ContinuityState,
    columns: Vec<StageColumn>,
    stages_generated: u32,
}

impl World {
    /// Creates a new world with the default seed and corridor heights.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_seed: DEFAULT_SESSION_SEED,
            continuity: ContinuityState::new(DEFAULT_CEILING_HEIGHT, DEFAULT_FLOOR_HEIGHT),
            columns: Vec::new(),
            stages_generated: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Executes a command against the world and broadcasts resulting events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureGenerator { seed, continuity } => {
            world.session_seed = seed;
            world.continuity = continuity;
            world.columns.clear();
            world.stages_generated = 0;
            out_events.push(Event::GeneratorConfigured { seed, continuity });
        }
        Command::LoadStage { plan } => {
            let stage = StageId::new(world.stages_generated);
            // The counter advances on every attempt so a rejected stage does
            // not shift the derived seeds of the stages after it.
            world.stages_generated += 1;

            let mut generator =
                StageGenerator::new(GeneratorConfig::for_stage(world.session_seed, stage));
            match generator.assemble_stage(&plan, world.continuity) {
                Ok(assembled) => {
                    world.continuity = assembled.continuity();
                    match assembled.mismatch() {
                        Some(mismatch) => {
                            log::warn!(
                                "stage {} discarded: {mismatch}",
                                stage.get()
                            );
                            world.columns.clear();
                            out_events.push(Event::StageRejected {
                                stage,
                                reason: StageRejection::SurfacesOutOfStep(mismatch),
                            });
                        }
                        None => {
                            world.columns = assembled.into_columns();
                            log::info!(
                                "stage {} ready with {} columns",
                                stage.get(),
                                world.columns.len()
                            );
                            out_events.push(Event::StageReady {
                                stage,
                                columns: world.columns.len(),
                            });
                        }
                    }
                }
                Err(error) => {
                    log::error!("stage {} rejected: {error}", stage.get());
                    world.columns.clear();
                    out_events.push(Event::StageRejected {
                        stage,
                        reason: StageRejection::InvalidStageData(error),
                    });
                }
            }
        }
    }
}

/// Read-only queries over the world state.
pub mod query {
    use cavern_run_core::{ContinuityState, StageColumn};

    use super::World;

    /// Columns of the active stage, in ascending horizontal order.
    #[must_use]
    pub fn stage_columns(world: &World) -> &[StageColumn] {
        &world.columns
    }

    /// Continuity heights the next stage will start from.
    #[must_use]
    pub fn continuity(world: &World) -> ContinuityState {
        world.continuity
    }

    /// Number of stage generation attempts made in this session.
    #[must_use]
    pub fn stages_generated(world: &World) -> u32 {
        world.stages_generated
    }
}
