//! The update scheduler: one fixed-cadence encoding pass per tick.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use urania_midi::MidiOutput;

use crate::chart::{ChartSettings, ChartSource, ChartType, Initials, Instant};
use crate::encoder::{encode_frame, FrameHeader};
use crate::layout::{Viewport, WheelLayout};

/// Cadence of the encoding pass.
pub const UPDATE_INTERVAL: Duration = Duration::from_millis(1000);

/// Everything one run needs: the instants, settings, identity and viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub origin: Instant,
    /// Required when `settings.chart_type` is transit.
    pub transit: Option<Instant>,
    pub settings: ChartSettings,
    pub initials: Initials,
    pub viewport: Viewport,
}

impl RunPlan {
    /// Live mode tracks the wall clock; fixed mode re-derives the same
    /// instant every tick. The transit instant decides when a transit layer
    /// is active.
    pub fn is_live(&self) -> bool {
        self.origin.is_current_time
            || (self.settings.chart_type == ChartType::Transit
                && self.transit.as_ref().map(|t| t.is_current_time).unwrap_or(false))
    }
}

/// One tick's work: compute the snapshot, encode the frame, emit it.
///
/// The tick body is synchronous and non-suspending; failures are isolated
/// per tick and never escalate to the scheduler.
pub struct TickEngine {
    plan: RunPlan,
    live: bool,
    header: FrameHeader,
    source: Box<dyn ChartSource>,
    outputs: Vec<Box<dyn MidiOutput>>,
}

impl TickEngine {
    pub fn new(
        plan: RunPlan,
        source: Box<dyn ChartSource>,
        outputs: Vec<Box<dyn MidiOutput>>,
    ) -> Self {
        let live = plan.is_live();
        let header = FrameHeader::new(plan.initials, &plan.origin);
        Self {
            plan,
            live,
            header,
            source,
            outputs,
        }
    }

    /// Run one encoding pass. Every tick builds its own snapshot; nothing is
    /// carried over from the previous tick.
    pub fn run_tick(&mut self) {
        let transit_run = self.plan.settings.chart_type == ChartType::Transit;

        let origin_instant = if self.live && !transit_run {
            self.plan.origin.at_current_time()
        } else {
            self.plan.origin.clone()
        };

        let chart = match self.source.calculate(&origin_instant, &self.plan.settings) {
            Ok(chart) => chart,
            Err(e) => {
                log::warn!("chart computation failed, skipping tick: {}", e);
                return;
            }
        };

        if transit_run {
            let Some(transit) = self.plan.transit.clone() else {
                log::warn!("transit run without a transit instant, skipping tick");
                return;
            };
            let transit_instant = if self.live { transit.at_current_time() } else { transit };
            match self.source.calculate(&transit_instant, &self.plan.settings) {
                Ok(layer) => {
                    // The rendering collaborator redraws from this layer.
                    log::debug!("transit layer: {} aspects", layer.aspects.len());
                }
                Err(e) => {
                    log::warn!("transit computation failed, skipping tick: {}", e);
                    return;
                }
            }
        }

        let layout = WheelLayout::new(&chart, &self.plan.settings, self.plan.viewport);
        let frame = encode_frame(&chart, &layout, &self.header);

        for output in &mut self.outputs {
            for msg in &frame {
                if let Err(e) = output.send(*msg) {
                    log::warn!("MIDI send failed on {}: {}", output.name(), e);
                    break;
                }
            }
        }
    }
}

/// Drives a `TickEngine` at the fixed cadence.
///
/// Owns the single timer handle; `start` and `reconfigure` replace it
/// atomically through `&mut self`, so at most one timer is ever armed.
pub struct UpdateScheduler {
    handle: Option<JoinHandle<()>>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Run one pass immediately, then repeat at the fixed interval. Any
    /// previously armed timer is cancelled first. Overrunning ticks are
    /// skipped, not queued.
    pub fn start(&mut self, mut engine: TickEngine) {
        self.stop();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(UPDATE_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                // Synchronous: cancellation can only land on the await
                // above, never inside a pass.
                engine.run_tick();
            }
        }));
    }

    /// Tear down the current run and start a new one with the new
    /// configuration.
    pub fn reconfigure(&mut self, engine: TickEngine) {
        self.start(engine);
    }

    /// Cancel the armed timer. Idempotent; an in-flight pass finishes.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
