use clap::Parser;
use log::{error, info};
use orbit_scene::app::{run_cli, run_gui};
use orbit_scene::error::SceneError;
use orbit_scene::io::config::Config;

#[derive(Parser, Debug)]
#[command(name = "orbit-scene")]
#[command(about = "Software-rendered Phong scene with an orbit camera")]
struct Cli {
    /// Scene configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Render one frame to a PNG instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Output path for headless mode, overrides `render.output`
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn main() -> Result<(), SceneError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .filter_module("egui_winit", log::LevelFilter::Warn)
        .filter_module("winit", log::LevelFilter::Warn)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config from '{}'", path);
            Config::load(path).inspect_err(|e| error!("{e}"))?
        }
        None => {
            info!("No config given, using defaults");
            Config::default()
        }
    };
    if let Some(output) = cli.output {
        config.render.output = output;
    }

    if cli.headless {
        run_cli(config)
    } else {
        run_gui(config)
    }
}
