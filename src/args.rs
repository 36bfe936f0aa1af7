//! Command-line argument definitions for the YardPlan CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the configuration file, control logging
//! verbosity, and optionally run a single planner operation instead of the
//! interactive menu.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the YardPlan layout planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (JSON or TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Planner operation; without one the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One-shot planner operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an empty layout file with the given yard dimensions
    New {
        /// Path of the layout file to create
        file: PathBuf,

        /// Layout name kept in the file metadata; defaults to the file stem
        #[arg(short, long)]
        name: Option<String>,

        /// Width along the front property line, in feet
        #[arg(long)]
        front_width: f64,

        /// Depth along the left property line, in feet
        #[arg(long)]
        left_depth: f64,
    },

    /// Print a layout's objects and their property-line distances
    Show {
        /// Path of the layout file to read
        file: PathBuf,
    },

    /// Open a layout in the interactive editor
    Edit {
        /// Path of the layout file to edit
        file: PathBuf,
    },

    /// Render a layout to a canvas PNG
    ExportPng {
        /// Path of the layout file to read
        file: PathBuf,

        /// Output path; defaults to the prints directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a layout to a printable SVG drawing
    ExportSvg {
        /// Path of the layout file to read
        file: PathBuf,

        /// Output path; defaults to the prints directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
