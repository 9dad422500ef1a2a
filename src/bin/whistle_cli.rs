use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use whistle_control::audio::{
    list_input_devices, select_device, CaptureConfig, CaptureStream, FrameSource, WavFrameSource,
};
use whistle_control::config::{AppConfig, AudioConfig};
use whistle_control::error::{log_audio_error, AudioError};
use whistle_control::karaoke::GameState;
use whistle_control::navigator::LogKeyInjector;
use whistle_control::session::{FrameDriver, KaraokeSession, NavigatorSession, StopReason};

#[derive(Parser, Debug)]
#[command(
    name = "whistle_cli",
    about = "Whistle-controlled karaoke game and list navigator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List input-capable audio devices
    Devices,
    /// Play the karaoke song and print the final score as JSON
    Karaoke(RunArgs),
    /// Move a three-item selection with rising and falling chirps
    Navigate(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Capture from this input device instead of prompting
    #[arg(long, conflicts_with = "wav")]
    device: Option<usize>,
    /// Replay a mono WAV file instead of capturing live
    #[arg(long)]
    wav: Option<PathBuf>,
    /// Configuration file (defaults to assets/whistle_config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Devices => run_devices(),
        Commands::Karaoke(args) => run_karaoke(&args),
        Commands::Navigate(args) => run_navigate(&args),
    }
}

fn run_devices() -> Result<ExitCode> {
    let devices = audio(list_input_devices(), "listing input devices")?;
    if devices.is_empty() {
        println!("No input devices found");
        return Ok(ExitCode::from(0));
    }

    for device in devices {
        println!("Input Device id {} - {}", device.index, device.name);
    }
    Ok(ExitCode::from(0))
}

fn run_karaoke(args: &RunArgs) -> Result<ExitCode> {
    let config = load_config(args);
    let (mut source, live) = open_source(args, &config.audio, config.karaoke.chunk_size)?;
    let mut session = KaraokeSession::new(&config);
    let mut frames = 0u64;

    loop {
        let remaining = args.frames.map(|limit| limit.saturating_sub(frames));
        let summary = audio(
            FrameDriver::new(remaining).run(source.as_mut(), &mut session),
            "karaoke",
        )?;
        frames += summary.frames;

        emit_report(&KaraokeReport {
            score: session.score(),
            frames,
            state: session.engine().state(),
            stop_reason: summary.reason,
        })?;

        if live && summary.reason == StopReason::SessionFinished && prompt_restart()? {
            source.discard_pending();
            session.restart();
            continue;
        }
        return Ok(ExitCode::from(0));
    }
}

fn run_navigate(args: &RunArgs) -> Result<ExitCode> {
    let config = load_config(args);
    let (mut source, _) = open_source(args, &config.audio, config.navigator.chunk_size)?;
    let mut session = NavigatorSession::new(&config, LogKeyInjector);

    let summary = audio(
        FrameDriver::new(args.frames).run_with(source.as_mut(), &mut session, |report| {
            if report.key.is_some() {
                eprintln!("selected item {}", report.selected);
            }
        }),
        "navigate",
    )?;

    emit_report(&NavigateReport {
        selected: session.navigator().selected(),
        frames: summary.frames,
        transitions: session.navigator().transitions(),
        stop_reason: summary.reason,
    })?;
    Ok(ExitCode::from(0))
}

fn load_config(args: &RunArgs) -> AppConfig {
    match &args.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    }
}

/// Open the replay file or live device; the flag is true for live capture
fn open_source(
    args: &RunArgs,
    audio_config: &AudioConfig,
    frame_len: usize,
) -> Result<(Box<dyn FrameSource>, bool)> {
    if let Some(path) = &args.wav {
        let source = audio(WavFrameSource::open(path, frame_len), "opening replay file")
            .with_context(|| format!("loading {}", path.display()))?;
        if source.sample_rate() != audio_config.sample_rate {
            tracing::warn!(
                "[Replay] {} is {} Hz, analysis assumes {} Hz",
                path.display(),
                source.sample_rate(),
                audio_config.sample_rate
            );
        }
        return Ok((Box::new(source), false));
    }

    let device = match args.device {
        Some(index) => index,
        None => {
            let devices = audio(list_input_devices(), "listing input devices")?;
            let stdin = io::stdin();
            audio(
                select_device(&devices, stdin.lock(), io::stderr()),
                "selecting input device",
            )?
        }
    };

    let stream = audio(
        CaptureStream::open(device, CaptureConfig::new(audio_config, frame_len)),
        "opening capture stream",
    )?;
    Ok((Box::new(stream), true))
}

/// Ask the operator whether to play again after the song ended
fn prompt_restart() -> Result<bool> {
    eprint!("Song over. Type r and Enter to restart, anything else quits: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading restart answer")?;
    Ok(line.trim().eq_ignore_ascii_case("r"))
}

/// Log an audio error with its code before handing it to anyhow
fn audio<T>(result: Result<T, AudioError>, context: &'static str) -> Result<T> {
    result
        .map_err(|err| {
            log_audio_error(&err, context);
            err
        })
        .context(context)
}

fn emit_report<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
struct KaraokeReport {
    score: u32,
    frames: u64,
    state: GameState,
    stop_reason: StopReason,
}

#[derive(Serialize)]
struct NavigateReport {
    selected: usize,
    frames: u64,
    transitions: u64,
    stop_reason: StopReason,
}
