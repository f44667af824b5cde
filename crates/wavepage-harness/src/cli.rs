#![forbid(unsafe_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::info;
use wavepage_core::{GesturePhase, Size, TransitionEvent, WaveConfig, WaveContainer};

use crate::driver::{Driver, Outcome};
use crate::error::{HarnessError, Result};
use crate::logging::{DEFAULT_FILTER, VERBOSE_FILTER, init_tracing};
use crate::script::GestureScript;
use crate::trace::write_jsonl;

pub const DEFAULT_MAX_FRAMES: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReleaseArg {
    #[default]
    Ended,
    Cancelled,
    Failed,
}

impl From<ReleaseArg> for GesturePhase {
    fn from(arg: ReleaseArg) -> Self {
        match arg {
            ReleaseArg::Ended => GesturePhase::Ended,
            ReleaseArg::Cancelled => GesturePhase::Cancelled,
            ReleaseArg::Failed => GesturePhase::Failed,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wavepage-harness",
    about = "Replay a scripted swipe through the wave transition engine and print one JSON object per frame",
    version
)]
pub struct Cli {
    /// View width.
    #[arg(long, default_value_t = 300.0)]
    pub width: f64,

    /// View height.
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// Horizontal drag translation; negative is leftward.
    #[arg(long, default_value_t = -150.0, allow_negative_numbers = true)]
    pub drag: f64,

    /// Frames spent dragging before release.
    #[arg(long, default_value_t = 30)]
    pub frames: u32,

    /// Tap the "next" button instead of dragging.
    #[arg(long, conflicts_with = "backward")]
    pub tap: bool,

    /// Swipe from the left edge toward the previous page.
    #[arg(long)]
    pub backward: bool,

    /// Terminal phase of the drag.
    #[arg(long, value_enum, default_value_t = ReleaseArg::Ended)]
    pub release: ReleaseArg,

    /// Number of pages in the synthetic source.
    #[arg(long, default_value_t = 5)]
    pub pages: usize,

    /// Starting page (default: 0, or 1 with --backward).
    #[arg(long)]
    pub start_index: Option<usize>,

    /// Abort if the transition has not finished after this many frames.
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    pub max_frames: u32,

    /// WaveConfig file (`.json`, otherwise TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON on stderr.
    #[arg(long)]
    pub log_json: bool,

    /// Debug-level logs.
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    init_tracing(cli.log_json, filter);
    let stdout = std::io::stdout();
    run(&cli, stdout.lock()).map(|_| ())
}

/// Run the scripted transition described by `cli`, writing the trace to `out`.
pub fn run<W: Write>(cli: &Cli, out: W) -> Result<Outcome> {
    if !(cli.width > 0.0 && cli.height > 0.0) {
        return Err(HarnessError::InvalidArgument {
            message: format!("view size must be positive, got {}x{}", cli.width, cli.height),
        });
    }
    if cli.pages == 0 {
        return Err(HarnessError::InvalidArgument {
            message: "--pages must be at least 1".into(),
        });
    }

    let start = cli.start_index.unwrap_or(usize::from(cli.backward));
    let config = load_config(cli.config.as_deref())?.with_start_page_index(start);
    let size = Size::new(cli.width, cli.height);
    let source: Vec<String> = (0..cli.pages).map(|i| format!("page-{i}")).collect();
    let container = WaveContainer::new(source, Vec::<TransitionEvent<String>>::new(), size, config)?;

    let script = if cli.tap {
        GestureScript::Tap
    } else if cli.backward {
        GestureScript::backward(size, cli.drag, cli.frames)
    } else {
        GestureScript::forward(size, cli.drag, cli.frames)
    }
    .with_release(cli.release.into());

    let mut driver = Driver::new(container);
    let outcome = driver.play(&script, cli.max_frames)?;
    write_jsonl(out, driver.records())?;

    for event in driver.container().delegate() {
        info!(target: "wavepage.harness", ?event, "delegate event");
    }
    Ok(outcome)
}

fn load_config(path: Option<&Path>) -> Result<WaveConfig> {
    let Some(path) = path else {
        return Ok(WaveConfig::default());
    };
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        WaveConfig::from_json_file(path)?
    } else {
        WaveConfig::from_toml_file(path)?
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::read_jsonl;
    use wavepage_core::WaveError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wavepage-harness").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.width, 300.0);
        assert_eq!(cli.drag, -150.0);
        assert_eq!(cli.frames, 30);
        assert_eq!(cli.release, ReleaseArg::Ended);
        assert!(!cli.tap);
    }

    #[test]
    fn negative_drag_parses() {
        let cli = parse(&["--drag", "-15", "--frames", "5"]);
        assert_eq!(cli.drag, -15.0);
        assert_eq!(cli.frames, 5);
    }

    #[test]
    fn tap_conflicts_with_backward() {
        let err = Cli::try_parse_from(["wavepage-harness", "--tap", "--backward"]);
        assert!(err.is_err());
    }

    #[test]
    fn run_writes_one_line_per_frame() {
        let cli = parse(&["--drag", "-150", "--frames", "10"]);
        let mut buf = Vec::new();
        let outcome = run(&cli, &mut buf).unwrap();
        assert_eq!(outcome.completed, Some(true));
        let records = read_jsonl(&String::from_utf8(buf).unwrap()).unwrap();
        assert_eq!(records.len() as u32, outcome.frames);
        assert_eq!(records.last().unwrap().control, "completed");
        assert_eq!(records.last().unwrap().page_index, 1);
    }

    #[test]
    fn backward_defaults_to_second_page() {
        let cli = parse(&["--backward", "--drag", "200", "--frames", "8"]);
        let outcome = run(&cli, std::io::sink()).unwrap();
        assert_eq!(outcome.completed, Some(true));
    }

    #[test]
    fn rejected_begin_is_an_error() {
        let cli = parse(&["--backward", "--start-index", "0"]);
        let err = run(&cli, std::io::sink()).unwrap_err();
        assert!(matches!(err, HarnessError::Rejected(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn invalid_sizes_rejected() {
        let cli = parse(&["--width", "0"]);
        let err = run(&cli, std::io::sink()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.toml");
        std::fs::write(&path, "finish_threshold_forward = 0.5\n").unwrap();
        let cli = parse(&[
            "--drag",
            "-150",
            "--frames",
            "4",
            "--config",
            path.to_str().unwrap(),
        ]);
        // p = 0.225 is below the raised threshold.
        let outcome = run(&cli, std::io::sink()).unwrap();
        assert_eq!(outcome.completed, Some(false));
    }

    #[test]
    fn bad_config_file_exits_2() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.toml");
        std::fs::write(&path, "follow_speed = -1.0\n").unwrap();
        let cli = parse(&["--config", path.to_str().unwrap()]);
        let err = run(&cli, std::io::sink()).unwrap_err();
        assert!(matches!(err, HarnessError::Wave(WaveError::InvalidConfig(_))), "{err}");
        assert_eq!(err.exit_code(), 2);

        std::fs::write(&path, "follow_speed = \"fast\"\n").unwrap();
        let err = run(&cli, std::io::sink()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
