use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use media_tracks::config::AppConfig;
use media_tracks::context::AppContext;
use media_tracks::player::backend::SymphoniaBackend;
use media_tracks::player::tracks::{AudioTrack, TrackType};

#[derive(Parser, Debug)]
#[command(
    name = "tracks_cli",
    about = "Probe media files for audio tracks and exercise selection"
)]
struct Cli {
    /// Override path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Discover and print the audio tracks of a media file
    Probe {
        path: PathBuf,
        /// Emit descriptors as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Discover tracks, then pin audio output to one group
    Select {
        path: PathBuf,
        #[arg(long)]
        group: u32,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    media_tracks::init_app();

    let cli = Cli::parse();
    let config = cli
        .config
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);
    let backend = Arc::new(SymphoniaBackend::new(config.probe.clone()));
    let context = AppContext::with_backend(config, backend);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    match cli.command {
        Commands::Probe { path, json } => run_probe(&runtime, &context, &path, json),
        Commands::Select { path, group } => run_select(&runtime, &context, &path, group),
    }
}

fn run_probe(
    runtime: &tokio::runtime::Runtime,
    context: &AppContext,
    path: &PathBuf,
    json: bool,
) -> Result<ExitCode> {
    let locator = path.to_string_lossy().to_string();
    let tracks = runtime
        .block_on(context.get_audio_tracks(Some(locator)))
        .with_context(|| format!("probing {:?}", path))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tracks)?);
    } else {
        emit_table(&tracks);
    }

    context.release_player()?;
    Ok(ExitCode::from(0))
}

fn run_select(
    runtime: &tokio::runtime::Runtime,
    context: &AppContext,
    path: &PathBuf,
    group: u32,
) -> Result<ExitCode> {
    let locator = path.to_string_lossy().to_string();
    let tracks = runtime
        .block_on(context.get_audio_tracks(Some(locator)))
        .with_context(|| format!("probing {:?}", path))?;
    emit_table(&tracks);

    context.set_audio_track(Some(group))?;

    match context.current_selection()? {
        Some(parameters) => match parameters.override_for(TrackType::Audio) {
            Some(selection) => println!(
                "audio pinned to group {} track {:?}",
                selection.group_index, selection.track_indices
            ),
            None => println!("no audio override applied (group {} not reported)", group),
        },
        None => println!("no live session"),
    }

    context.release_player()?;
    Ok(ExitCode::from(0))
}

fn emit_table(tracks: &[AudioTrack]) {
    if tracks.is_empty() {
        println!("no audio tracks found");
        return;
    }

    println!("group  track  lang  label                 ch  rate     bitrate  codec");
    for track in tracks {
        println!(
            "{:<6} {:<6} {:<5} {:<21} {:<3} {:<8} {:<8} {}",
            track.group_index,
            track.track_index,
            track.language,
            track.label,
            track.channel_count,
            track.sample_rate,
            track.bitrate,
            track.codec
        );
    }
}
