use anyhow::Context;
use aviator_kernel::{CancelToken, FixedTicks, Game, GameConfig};
use aviator_render::DebugTextRenderer;
use aviator_scene::Viewport;
use aviator_tools::ControlPanel;
use clap::{Parser, Subcommand, ValueEnum};
use glam::{Vec2, Vec3};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aviator-cli", about = "Headless driver for the aviator scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the loop for a fixed number of frames and print the final scene
    Run {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Cursor position in window pixels, e.g. `640,360`
        #[arg(short, long, value_parser = parse_pointer)]
        pointer: Option<(f64, f64)>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the debug panel with default light values
    Panel,
    /// Print the effective config as YAML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_pointer(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

#[derive(Serialize)]
struct RunReport {
    frames: u64,
    viewport: [u32; 2],
    pointer: Vec2,
    airplane_position: Vec3,
    propeller_rotation: f32,
    sea_rotation: f32,
    sky_rotation: f32,
    node_count: usize,
    shadow_light_position: Option<Vec3>,
}

impl RunReport {
    fn capture(game: &Game, frames: u64) -> Self {
        let scene = game.scene();
        let objects = game.objects();
        let viewport = game.viewport();
        Self {
            frames,
            viewport: [viewport.width, viewport.height],
            pointer: game.view_state().pointer(),
            airplane_position: objects.airplane.position(scene),
            propeller_rotation: objects.airplane.propeller_rotation(scene),
            sea_rotation: objects.sea.rotation(scene),
            sky_rotation: objects.sky.rotation(scene),
            node_count: scene.node_count(),
            shadow_light_position: game.lighting().map(|l| l.shadow().position()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GameConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            frames,
            pointer,
            format,
        } => {
            let viewport = Viewport::new(config.window.width, config.window.height);
            let mut game = Game::new(viewport, &config)?;
            let mut renderer = DebugTextRenderer::new(viewport.width, viewport.height);
            if let Some((x, y)) = pointer {
                game.pointer_moved(x, y);
            }

            let outcome = game.run(
                &mut renderer,
                &mut FixedTicks::new(frames),
                &CancelToken::new(),
            );
            tracing::info!(frames = outcome.frames, "run finished");

            match format {
                Format::Text => {
                    if let Some(text) = outcome.last {
                        print!("{text}");
                    }
                }
                Format::Json => {
                    let report = RunReport::capture(&game, outcome.frames);
                    let json = serde_json::to_string_pretty(&report)
                        .context("serialize run report")?;
                    println!("{json}");
                }
            }
        }
        Commands::Panel => {
            let viewport = Viewport::new(config.window.width, config.window.height);
            let game = Game::new(viewport, &config)?;
            let lighting = game.lighting().context("scene has no lights")?;
            let panel = ControlPanel::lights();
            tracing::debug!(controls = panel.control_count(), "panel built");
            print!("{}", panel.describe(lighting));
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_argument_parses() {
        assert_eq!(parse_pointer("640,360"), Ok((640.0, 360.0)));
        assert_eq!(parse_pointer(" 1.5 , -2 "), Ok((1.5, -2.0)));
        assert!(parse_pointer("640").is_err());
        assert!(parse_pointer("a,b").is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from(["aviator-cli", "run", "--verbose", "--config", "a.yaml"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("a.yaml")));
        assert!(matches!(cli.command, Commands::Run { frames: 60, .. }));

        let cli = Cli::try_parse_from(["aviator-cli", "-v", "panel"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn report_reflects_the_run() {
        let config = GameConfig::default();
        let mut game = Game::new(Viewport::new(800, 600), &config).unwrap();
        let mut renderer = DebugTextRenderer::new(800, 600);
        game.pointer_moved(400.0, 300.0);
        let outcome = game.run(&mut renderer, &mut FixedTicks::new(3), &CancelToken::new());

        let report = RunReport::capture(&game, outcome.frames);
        assert_eq!(report.frames, 3);
        assert_eq!(report.airplane_position, Vec3::new(0.0, 100.0, 0.0));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["viewport"], serde_json::json!([800, 600]));
        assert_eq!(json["frames"], 3);
    }
}
