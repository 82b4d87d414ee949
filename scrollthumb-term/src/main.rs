//! Terminal pager with an auto-hiding scroll thumb.

mod app;
mod buffer;
mod document;
mod error;
mod host;
mod render;
mod terminal;

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use scrollthumb::{PropValue, ThumbConfig, ThumbProps};
use simplelog::{Config, WriteLogger};

use crate::app::Options;
use crate::document::Document;
use crate::error::AppError;

/// Page through a text file with a scroll thumb that shows while scrolling
/// and fades out when idle.
#[derive(Parser, Debug)]
#[command(name = "scrollthumb")]
#[command(version)]
struct Cli {
    /// File to show (a built-in sample when omitted)
    file: Option<PathBuf>,

    /// JSON file with thumb props; flags below override it
    #[arg(long)]
    props: Option<PathBuf>,

    /// Thumb color, e.g. "#2563eb", "rgb(37, 99, 235)" or "oklch(0.6 0.2 260)"
    #[arg(long)]
    color: Option<String>,

    /// Thumb width in px
    #[arg(long)]
    width: Option<String>,

    /// Thumb height in px
    #[arg(long)]
    height: Option<String>,

    /// Edge to anchor the thumb to: left or right
    #[arg(long)]
    position: Option<String>,

    /// Stacking order; negative values draw behind text
    #[arg(long, allow_hyphen_values = true)]
    z_index: Option<String>,

    /// Corner radius in px
    #[arg(long)]
    border_radius: Option<String>,

    /// Seconds of inactivity before the thumb hides
    #[arg(long, allow_hyphen_values = true)]
    hidetime: Option<String>,

    /// Reject malformed props instead of falling back to defaults
    #[arg(long)]
    strict: bool,

    /// Frame rate for scroll updates and fades
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Show and hide the thumb without fading
    #[arg(long)]
    reduced_motion: bool,

    /// Write logs to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Log level for --log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,
}

impl Cli {
    /// Props from `--props`, with the individual flags layered on top.
    fn props(&self) -> Result<ThumbProps, AppError> {
        let mut props = match &self.props {
            Some(path) => read_props(path)?,
            None => ThumbProps::default(),
        };

        let text = |value: &Option<String>| value.as_deref().map(PropValue::from);
        if self.color.is_some() {
            props.color = self.color.clone();
        }
        if self.position.is_some() {
            props.position = self.position.clone();
        }
        props.width = text(&self.width).or(props.width);
        props.height = text(&self.height).or(props.height);
        props.z_index = text(&self.z_index).or(props.z_index);
        props.border_radius = text(&self.border_radius).or(props.border_radius);
        props.hidetime = text(&self.hidetime).or(props.hidetime);
        Ok(props)
    }

    /// Malformed values fall back to defaults and an unknown position hides
    /// the thumb, unless `--strict` is given.
    fn config(&self) -> Result<ThumbConfig, AppError> {
        let props = self.props()?;
        if self.strict {
            Ok(ThumbConfig::try_from_props(&props)?)
        } else {
            Ok(ThumbConfig::from_props(&props))
        }
    }
}

fn read_props(path: &Path) -> Result<ThumbProps, AppError> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| AppError::Props {
        path: path.to_path_buf(),
        source,
    })
}

async fn try_main(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = &cli.log {
        WriteLogger::init(cli.log_level, Config::default(), File::create(path)?)?;
    }

    let config = cli.config()?;
    log::debug!("thumb config: {config:?}");

    let document = match &cli.file {
        Some(path) => Document::load(path)?,
        None => Document::sample(),
    };

    let options = Options {
        fps: cli.fps,
        reduced_motion: cli.reduced_motion,
    };
    app::run(document, config, options).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_main(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("scrollthumb: {e}");
            ExitCode::FAILURE
        }
    }
}
