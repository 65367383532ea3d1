#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Cavern Run experience.

mod preview;
mod stages;

use anyhow::Result;
use cavern_run_core::{Command, Event, WELCOME_BANNER};
use cavern_run_world::{self as world, query, World};
use clap::Parser;

/// Generates consecutive Cavern Run stages and previews them in the terminal.
#[derive(Debug, Parser)]
#[command(name = "cavern-run")]
struct Args {
    /// Session seed from which per-stage sprite streams are derived.
    #[arg(long, default_value_t = stages::DEFAULT_SEED)]
    seed: u64,

    /// Number of consecutive demo stages to generate.
    #[arg(long, default_value_t = 3)]
    stages: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("{WELCOME_BANNER}");

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureGenerator {
            seed: args.seed,
            continuity: stages::STARTING_CONTINUITY,
        },
        &mut events,
    );

    let atlas = preview::GlyphAtlas;
    for index in 0..args.stages {
        events.clear();
        world::apply(
            &mut world,
            Command::LoadStage {
                plan: stages::demo_stage(index),
            },
            &mut events,
        );

        for event in &events {
            match event {
                Event::StageReady { stage, columns } => {
                    println!("stage {} ready ({columns} columns)", stage.get());
                    let rendered =
                        preview::render_corridor(query::stage_columns(&world), &atlas)?;
                    print!("{rendered}");
                }
                Event::StageRejected { stage, reason } => {
                    println!("stage {} rejected: {reason}", stage.get());
                }
                Event::GeneratorConfigured { .. } => {}
            }
        }
    }

    Ok(())
}
