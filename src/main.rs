//! Orrery - Keplerian solar system animation
//!
//! A desktop application animating bodies on Keplerian orbits, with a
//! movable point of view, zoom, pan and tilt.
//!
//! Usage:
//!   orrery [--preset solar-system | --scenario path/to/scenario.json] [--pov earth] [--paused]

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;

use orrery::camera::CameraPlugin;
use orrery::error::Result;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::scenarios::{
    DEFAULT_CANVAS_SIZE, ScenarioDefinition, ScenarioPlugin, ScenarioState, get_preset,
};
use orrery::time::TimePlugin;
use orrery::ui::UiPlugin;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keplerian solar system animation", long_about = None)]
struct Args {
    /// Scenario document to load (overrides --preset)
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Built-in scenario to load
    #[arg(short, long, default_value = "solar-system")]
    preset: String,

    /// Body to use as the initial point of view
    #[arg(long)]
    pov: Option<String>,

    /// Start with the clock paused
    #[arg(long)]
    paused: bool,
}

fn load_scenario(args: &Args) -> Result<ScenarioState> {
    let mut definition = match &args.scenario {
        Some(path) => ScenarioDefinition::load(path)?,
        None => get_preset(&args.preset)?,
    };
    if let Some(pov) = &args.pov {
        definition.config.pov = Some(pov.clone());
    }
    if args.paused {
        definition.config.paused = true;
    }
    ScenarioState::from_definition(&definition, DEFAULT_CANVAS_SIZE.x, DEFAULT_CANVAS_SIZE.y)
}

fn main() -> ExitCode {
    let args = Args::parse();
    let scenario = match load_scenario(&args) {
        Ok(scenario) => scenario,
        Err(err) => {
            eprintln!("orrery: {err}");
            return ExitCode::FAILURE;
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: format!("Orrery - {}", scenario.name()),
                resolution: (DEFAULT_CANVAS_SIZE.x as u32, DEFAULT_CANVAS_SIZE.y as u32).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(scenario)
        .add_plugins((
            ScenarioPlugin,
            TimePlugin,
            CameraPlugin,
            InputPlugin,
            RenderPlugin,
            UiPlugin,
        ))
        .run();

    ExitCode::SUCCESS
}
