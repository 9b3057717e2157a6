//! Play command handler
//!
//! A headless stand-in for a host engine: ticks a [`TrajectoryActor`] at a
//! fixed frame rate and prints the transform it would apply every frame.

use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use glam::{Quat, Vec3};
use serde::Serialize;

use towr_replay::cli::PlayArgs;
use towr_replay::{AdvanceMode, Config, EffectorLayout, PlaybackActor, TrajectoryActor, TransformSink};

/// Keeps only the transform of the current frame.
#[derive(Debug, Default)]
struct FrameSink {
    location: Vec3,
    rotation: Quat,
}

impl TransformSink for FrameSink {
    fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

/// One printed frame.
#[derive(Debug, Serialize)]
struct FrameRecord {
    frame: usize,
    time: f64,
    index: usize,
    position: Vec3,
    orientation: Quat,
    feet: Vec<Vec3>,
}

impl FrameRecord {
    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(
            out,
            "frame {:>5}  t={:>8.4}s  idx={:>5}  base=({:.2}, {:.2}, {:.2})  rot=({:.4}, {:.4}, {:.4}, {:.4})",
            self.frame,
            self.time,
            self.index,
            self.position.x,
            self.position.y,
            self.position.z,
            self.orientation.x,
            self.orientation.y,
            self.orientation.z,
            self.orientation.w,
        )?;
        for foot in &self.feet {
            write!(out, "  ({:.2}, {:.2}, {:.2})", foot.x, foot.y, foot.z)?;
        }
        writeln!(out)
    }
}

/// Apply command line overrides on top of the loaded config.
fn effective_config(args: &PlayArgs, mut config: Config) -> Config {
    if args.accumulate {
        config.playback.advance_mode = AdvanceMode::Accumulate;
    }
    if args.grouped {
        config.trajectory.effector_layout = EffectorLayout::Grouped;
    }
    if let Some(fps) = args.fps {
        config.playback.fps = fps;
    }
    config
}

/// Drive playback until the last sample (or `--frames`) and print every frame.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &PlayArgs, config: Config) -> Result<()> {
    let config = effective_config(args, config);
    let fps = config.playback.fps;
    if fps == 0 {
        bail!("Frame rate must be at least 1 fps");
    }

    let path = match &args.file {
        Some(file) => file.clone(),
        None => config.trajectory_path(&args.content_dir),
    };

    let mut actor = TrajectoryActor::new(config);
    actor
        .try_init_with_path(&path)
        .with_context(|| format!("Failed to load trajectory {}", path.display()))?;

    let interrupted = Arc::new(AtomicBool::new(false));
    if args.realtime {
        let flag = Arc::clone(&interrupted);
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("Failed to install Ctrl-C handler")?;
    }

    let delta_time = 1.0 / fps as f32;
    if args.frames.is_none() && actor.engine().would_stall(delta_time) {
        bail!(
            "At {} fps a frame is shorter than one sample ({:.3} ms), so truncating playback \
             never moves; lower --fps or pass --accumulate",
            fps,
            actor.engine().timestep() * 1_000.0
        );
    }
    let frame_duration = Duration::from_secs_f64(1.0 / f64::from(fps));
    let effectors = actor.engine().effector_count();
    let mut sink = FrameSink::default();
    let mut out = BufWriter::new(io::stdout().lock());

    let mut frame = 0;
    loop {
        let started = Instant::now();

        actor.on_tick(delta_time, &mut sink);
        frame += 1;

        let record = FrameRecord {
            frame,
            time: actor.engine().elapsed(),
            index: actor.engine().cursor(),
            position: sink.location,
            orientation: sink.rotation,
            feet: (0..effectors).map(|ee| actor.effector(ee)).collect(),
        };

        if args.json {
            serde_json::to_writer(&mut out, &record)?;
            writeln!(out)?;
        } else {
            record.write_text(&mut out)?;
        }

        let done = match args.frames {
            Some(limit) => frame >= limit,
            None => actor.engine().is_finished(),
        };
        if done || interrupted.load(Ordering::SeqCst) {
            break;
        }

        if args.realtime {
            out.flush()?;
            if let Some(remaining) = frame_duration.checked_sub(started.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    out.flush()?;
    tracing::info!(frames = frame, "playback finished");
    Ok(())
}
