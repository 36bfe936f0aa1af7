//! YardPlan entry point.

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use yardplan::{init_logging, shell, Args, Command, Config, PlannerState, Result, Yard};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'info' instead.",
            args.log_level
        );
        LevelFilter::INFO
    });
    init_logging(log_level)?;

    info!("Starting YardPlan {}", yardplan::VERSION);
    debug!("Parsed arguments: {:?}", args);

    if let Err(err) = run(args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    // An explicit --config that cannot be read is an error; the default
    // location silently falls back to defaults until first saved.
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default()?,
    };

    match args.command {
        None => shell::run_menu(&mut config, &config_path),
        Some(Command::New {
            file,
            name,
            front_width,
            left_depth,
        }) => {
            let yard = Yard::new(front_width, left_depth)?;
            let name = name.unwrap_or_else(|| {
                file.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Untitled")
                    .to_string()
            });
            let mut state = PlannerState::new(name, yard);
            state.save_as(&file)?;
            println!("Created {}.", file.display());
            Ok(())
        }
        Some(Command::Show { file }) => {
            let state = shell::open_planner(&config, &file)?;
            shell::show_layout(&state)
        }
        Some(Command::Edit { file }) => {
            let mut state = shell::open_planner(&config, &file)?;
            shell::run_editor(&mut state)?;
            shell::export_drawings(&state, &config)
        }
        Some(Command::ExportPng { file, output }) => {
            let state = shell::open_planner(&config, &file)?;
            let output = resolve_output(&config, &file, output, "png")?;
            state.export_png(&output)?;
            println!("Wrote {}.", output.display());
            Ok(())
        }
        Some(Command::ExportSvg { file, output }) => {
            let state = shell::open_planner(&config, &file)?;
            let output = resolve_output(&config, &file, output, "svg")?;
            state.export_svg(&output)?;
            println!("Wrote {}.", output.display());
            Ok(())
        }
    }
}

/// Explicit output path, or the prints directory named after the layout.
fn resolve_output(
    config: &Config,
    layout_path: &Path,
    output: Option<PathBuf>,
    extension: &str,
) -> Result<PathBuf> {
    match output {
        Some(path) => Ok(path),
        None => {
            config.ensure_directories()?;
            Ok(config.export_path_for_layout(layout_path, extension))
        }
    }
}
