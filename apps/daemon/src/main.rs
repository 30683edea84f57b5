//! Streams the configured chart to every connected MIDI output until
//! interrupted.

use std::path::Path;

use anyhow::Context;

use urania::{SwissChartSource, TickEngine, UpdateScheduler};
use urania_config::RunConfig;
use urania_midi::{default_backend, MidiOutput, RecordingOutput};

fn connect_outputs(config: &RunConfig) -> anyhow::Result<Vec<Box<dyn MidiOutput>>> {
    if config.midi.dry_run {
        log::info!("dry run: frames will be recorded, not sent");
        return Ok(vec![Box::new(RecordingOutput::new("dry-run"))]);
    }

    let mut backend =
        default_backend(&config.midi.client_name).context("failed to initialize MIDI backend")?;
    let devices = backend.refresh_devices()?;

    let selected: Vec<_> = if config.midi.devices.is_empty() {
        devices
    } else {
        devices
            .into_iter()
            .filter(|d| config.midi.devices.iter().any(|want| want == &d.id))
            .collect()
    };

    let mut outputs: Vec<Box<dyn MidiOutput>> = Vec::new();
    for device in &selected {
        match backend.connect(&device.id) {
            Ok(output) => outputs.push(output),
            Err(e) => log::warn!("skipping output {}: {}", device.name, e),
        }
    }

    if outputs.is_empty() {
        log::warn!("no MIDI outputs connected; frames will be computed but not sent");
    }
    Ok(outputs)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => urania_config::load(Path::new(&path))?,
        None => urania_config::load_or_default()?,
    };
    log::info!(
        "starting run: type={} mode={} zodiac={} house_system={}",
        config.plan.settings.chart_type.as_str(),
        config.plan.settings.mode.as_str(),
        config.plan.settings.zodiac.as_str(),
        config.plan.settings.house_system.as_str(),
    );

    let outputs = connect_outputs(&config)?;
    let source = SwissChartSource::new(config.ephemeris_path.clone());

    let engine = TickEngine::new(config.plan, Box::new(source), outputs);
    let mut scheduler = UpdateScheduler::new();
    scheduler.start(engine);

    log::info!("streaming; press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;

    scheduler.stop();
    log::info!("stopped");
    Ok(())
}
