// SPDX-License-Identifier: MPL-2.0
use iced_blocker::config::{self, Config};
use iced_blocker::error::{Error, Result};
use iced_blocker::indicator::{FrameAnimation, FrameSet};
use iced_blocker::presenter::PhaseKind;
use iced_blocker::renderer::TracingRenderer;
use iced_blocker::runtime;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Interval between two phase checks while waiting for the overlay to go away.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

const HELP: &str = "\
iced_blocker - run one blocker cycle and log what the renderer is asked to do

USAGE:
  iced_blocker [OPTIONS]

OPTIONS:
  --threshold MS   Display threshold (overrides settings)
  --minimum MS     Minimum display time (overrides settings)
  --work MS        Simulated work duration [default: 1000]
  --frames DIR     Directory holding ic_loader_*.png frames
  --config PATH    Settings file [default: user config dir]
  -h, --help       Print help
";

struct Flags {
    threshold: Option<u32>,
    minimum: Option<u32>,
    work: u64,
    frames: Option<PathBuf>,
    config: Option<PathBuf>,
}

fn parse_flags() -> std::result::Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    Ok(Some(Flags {
        threshold: args.opt_value_from_str("--threshold")?,
        minimum: args.opt_value_from_str("--minimum")?,
        work: args.opt_value_from_str("--work")?.unwrap_or(1000),
        frames: args.opt_value_from_str("--frames")?,
        config: args.opt_value_from_str("--config")?,
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(flags) = parse_flags().map_err(|err| Error::Config(err.to_string()))? else {
        print!("{HELP}");
        return Ok(());
    };

    let mut settings: Config = match &flags.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load().unwrap_or_default(),
    };
    if let Some(threshold) = flags.threshold {
        settings.display_threshold_ms = Some(threshold);
    }
    if let Some(minimum) = flags.minimum {
        settings.minimum_display_time_ms = Some(minimum);
    }

    let mut builder = settings.request_builder().closeable(true).on_force_close(|| {
        tracing::info!("blocker dismissed by user");
    });
    if let Some(dir) = &flags.frames {
        let frames = FrameSet::load_loader(dir);
        if frames.is_empty() {
            tracing::warn!(dir = %dir.display(), "no frames found, using spinner");
        } else {
            builder = builder.frames(
                FrameAnimation::new(frames).with_interval(settings.frame_interval()),
            );
        }
    }

    let (handle, task) = runtime::spawn(TracingRenderer::default());
    handle.request_show(builder.build())?;
    tracing::info!(work_ms = flags.work, "working");
    tokio::time::sleep(Duration::from_millis(flags.work)).await;
    handle.request_hide()?;

    while handle.phase().await? != PhaseKind::Idle {
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    handle.shutdown()?;
    task.await?;
    Ok(())
}
