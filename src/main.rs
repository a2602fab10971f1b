//! framefeed - frame-synchronized input dispatch demo
//!
//! Drives a terminal HUD engine with normalized pointer, wheel and keyboard input, one batch per
//! refresh tick.

#[cfg(feature = "config")]
use anyhow::Context;
use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use framefeed::frame::ViewportSize;
use framefeed::{Application, FramefeedError, LoopConfig};

fn cli() -> Command {
    let command = Command::new("framefeed")
        .version(framefeed::VERSION)
        .about("Batch terminal input into per-frame events for a render engine")
        .long_about(
            "framefeed collects mouse, wheel and keyboard input between refresh ticks, \
             normalizes it, and delivers each frame's events to a HUD engine in one ordered batch.",
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .help("Refresh ticks per second")
                .value_parser(value_parser!(u32).range(1..=1000)),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .help("Initial viewport width handed to the engine")
                .requires("height")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .help("Initial viewport height handed to the engine")
                .requires("width")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .help("Exit after this many frames")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("no-mouse")
                .long("no-mouse")
                .help("Do not capture mouse events")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .help("Path to a TOML config file (defaults to the platform config directory)")
            .value_parser(value_parser!(std::path::PathBuf)),
    );

    command
}

#[cfg(feature = "config")]
fn base_config(matches: &ArgMatches) -> Result<LoopConfig> {
    if let Some(path) = matches.get_one::<std::path::PathBuf>("config") {
        return LoopConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()));
    }
    match LoopConfig::default_path().filter(|path| path.is_file()) {
        Some(path) => LoopConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(LoopConfig::default()),
    }
}

#[cfg(not(feature = "config"))]
fn base_config(_matches: &ArgMatches) -> Result<LoopConfig> {
    Ok(LoopConfig::default())
}

/// Layer command-line flags over the file (or default) configuration.
fn build_config(matches: &ArgMatches) -> Result<LoopConfig> {
    let mut config = base_config(matches)?;

    if let Some(fps) = matches.get_one::<u32>("fps") {
        config.refresh_rate_hz = *fps;
    }

    match (
        matches.get_one::<u32>("width"),
        matches.get_one::<u32>("height"),
    ) {
        (Some(width), Some(height)) => {
            if *width == 0 || *height == 0 {
                return Err(FramefeedError::invalid_argument(format!(
                    "viewport must be non-empty: {width}x{height}"
                ))
                .into());
            }
            config.initial_viewport = Some(ViewportSize::new(*width, *height));
        }
        (None, None) => {}
        _ => {
            return Err(
                FramefeedError::invalid_argument("--width and --height must be given together")
                    .into(),
            )
        }
    }

    if let Some(frames) = matches.get_one::<u64>("frames") {
        config.max_frames = Some(*frames);
    }
    if matches.get_flag("no-mouse") {
        config.mouse_capture = false;
    }

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging; set RUST_LOG=debug to see per-frame activity
    env_logger::init();

    let matches = cli().get_matches();
    let config = build_config(&matches)?;

    let mut app = Application::new(config)?;
    let summary = app.run().await?;
    log::info!("{summary:?}");

    Ok(())
}
