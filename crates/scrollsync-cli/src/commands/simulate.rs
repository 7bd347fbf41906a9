use std::cell::Cell;
use std::rc::Rc;

use anyhow::{bail, Result};
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

use scrollsync_core::{AppConfig, ProgressTracker, ScrollSurface, SyncMode, VirtualSurface};

/// Frames allowed for smoothing to settle after the last step
const MAX_SETTLE_FRAMES: u32 = 1_000;

#[derive(Debug, Clone)]
pub struct SimulateOptions {
    pub content: f64,
    pub viewport: f64,
    pub steps: u32,
    pub cycles: u32,
    pub frame: bool,
    pub smooth: bool,
}

/// Outcome of a simulation run
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    /// Reported progress at the end of each cycle
    pub final_progress: Vec<f64>,
    /// Change notifications received across all cycles
    pub changes: u64,
    /// Listeners still registered on the surface after the last cycle
    pub leaked_listeners: usize,
}

pub async fn run(config: &AppConfig, options: SimulateOptions) -> Result<SimulationReport> {
    if options.steps == 0 {
        bail!("--steps must be at least 1");
    }

    let mut progress_config = config.progress.clone();
    if options.frame {
        progress_config.sync_mode = SyncMode::Frame;
    }
    if options.smooth {
        progress_config.smoothing_enabled = true;
    }

    let surface = Rc::new(VirtualSurface::new(options.content, options.viewport));
    let tracker = ProgressTracker::new(progress_config.clone());
    let changes = Rc::new(Cell::new(0u64));
    let mut report = SimulationReport::default();

    let mut frames = interval(progress_config.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        content = options.content,
        viewport = options.viewport,
        range = surface.scrollable_range(),
        sync_mode = ?progress_config.sync_mode,
        smoothing = progress_config.is_smooth(),
        "starting simulation"
    );

    for cycle in 1..=options.cycles {
        surface.scroll_to(0.0);
        let observation = tracker.observe(&surface);

        let counter = Rc::clone(&changes);
        let subscription = observation.on_change(move |progress| {
            counter.set(counter.get() + 1);
            debug!(progress, "progress changed");
        });

        let step = surface.scrollable_range() / options.steps as f64;
        for i in 1..=options.steps {
            frames.tick().await;
            surface.scroll_by(step);
            surface.frame(Instant::now().into_std());
            info!(
                cycle,
                step = i,
                offset = surface.scroll_offset(),
                progress = observation.progress(),
                "step"
            );
        }

        let mut settle_frames = 0;
        while !observation.is_settled() && settle_frames < MAX_SETTLE_FRAMES {
            frames.tick().await;
            surface.frame(Instant::now().into_std());
            settle_frames += 1;
        }

        let progress = observation.progress();
        println!("cycle {}: progress {:.3} ({} settle frames)", cycle, progress, settle_frames);
        report.final_progress.push(progress);

        drop(subscription);
        observation.stop();
    }

    report.changes = changes.get();
    report.leaked_listeners = surface.events().listener_count();
    println!(
        "listeners after {} cycles: {}",
        options.cycles, report.leaked_listeners
    );

    if report.leaked_listeners != 0 {
        bail!("{} scroll listeners leaked", report.leaked_listeners);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SimulateOptions {
        SimulateOptions {
            content: 1300.0,
            viewport: 300.0,
            steps: 4,
            cycles: 3,
            frame: false,
            smooth: false,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_simulation() {
        let report = run(&AppConfig::default(), options()).await.unwrap();
        assert_eq!(report.final_progress, vec![1.0, 1.0, 1.0]);
        // Four steps per cycle, each changes progress
        assert_eq!(report.changes, 12);
        assert_eq!(report.leaked_listeners, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_synced_smoothed_simulation() {
        let opts = SimulateOptions {
            frame: true,
            smooth: true,
            ..options()
        };
        let report = run(&AppConfig::default(), opts).await.unwrap();
        for progress in report.final_progress {
            assert!((progress - 1.0).abs() < 1e-9);
        }
        assert_eq!(report.leaked_listeners, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unscrollable_document() {
        let opts = SimulateOptions {
            content: 300.0,
            ..options()
        };
        let report = run(&AppConfig::default(), opts).await.unwrap();
        assert_eq!(report.final_progress, vec![0.0, 0.0, 0.0]);
        assert_eq!(report.changes, 0);
    }

    #[tokio::test]
    async fn test_zero_steps_rejected() {
        let opts = SimulateOptions {
            steps: 0,
            ..options()
        };
        assert!(run(&AppConfig::default(), opts).await.is_err());
    }
}
