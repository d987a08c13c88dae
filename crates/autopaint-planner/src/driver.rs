//! Incremental job driver
//!
//! A job runs through a fixed sequence of phases. Each call to
//! [`PlotDriver::tick`] does a bounded amount of work, so a host render loop
//! can interleave ticks with its own frames.

use crate::flatten::FlatScene;
use crate::motion::MotionStreamer;
use crate::sequence::sequence;
use crate::trace::StrokeTracer;
use autopaint_core::{ConfigError, EventSink, Layer, PlotEvent, PlotSettings, Scene, VectorPath};
use autopaint_fill::{FillEngine, FillPreparer, FillStrategy};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Job phase. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Idle,
    Tracing,
    FillSetup,
    Filling,
    Sequencing,
    Streaming,
    Done,
    Canceled,
}

impl Phase {
    /// True while a job is in flight.
    pub fn is_active(&self) -> bool {
        !matches!(self, Phase::Idle | Phase::Done | Phase::Canceled)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Tracing => "tracing",
            Phase::FillSetup => "fill setup",
            Phase::Filling => "filling",
            Phase::Sequencing => "sequencing",
            Phase::Streaming => "streaming",
            Phase::Done => "done",
            Phase::Canceled => "canceled",
        };
        write!(f, "{}", name)
    }
}

/// Shared cancel flag; clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Everything one job mutates.
#[derive(Debug, Clone)]
pub struct RunState {
    pub phase: Phase,
    /// Flattened scene; read-only once the job starts
    pub source: FlatScene,
    pub working: Layer,
    pub action: Layer,
    /// Occlusion pass over the fill layer, present during fill setup
    pub preparer: Option<FillPreparer>,
    /// Sequenced polylines awaiting streaming
    pub ordered: Vec<VectorPath>,
    /// Rendered streaming events, released in one go when the job completes
    pub pending: Vec<PlotEvent>,
    pub cursor: usize,
    pub completed: usize,
    pub total: usize,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            source: FlatScene::default(),
            working: Layer::new(),
            action: Layer::new(),
            preparer: None,
            ordered: Vec::new(),
            pending: Vec::new(),
            cursor: 0,
            completed: 0,
            total: 0,
        }
    }
}

pub struct PlotDriver {
    settings: PlotSettings,
    state: RunState,
    tracer: StrokeTracer,
    engine: FillEngine,
    streamer: MotionStreamer,
    cancel: CancelToken,
}

impl Default for PlotDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotDriver {
    pub fn new() -> Self {
        let settings = PlotSettings::default();
        Self {
            tracer: StrokeTracer::new(&settings),
            engine: FillEngine::new(settings.fill_strategy),
            settings,
            state: RunState::default(),
            streamer: MotionStreamer::new(),
            cancel: CancelToken::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn settings(&self) -> &PlotSettings {
        &self.settings
    }

    /// Polylines produced so far, before sequencing.
    pub fn action_layer(&self) -> &Layer {
        &self.state.action
    }

    /// Final drawing order, available once sequencing ran.
    pub fn ordered_paths(&self) -> &[VectorPath] {
        &self.state.ordered
    }

    /// A token that cancels the current and future jobs of this driver
    /// until the next `start`.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Start a job. Any job in flight is canceled first.
    ///
    /// Invalid settings reject the job without touching the current state.
    pub fn start(
        &mut self,
        scene: &Scene,
        settings: PlotSettings,
        sink: &mut dyn EventSink,
    ) -> Result<(), ConfigError> {
        settings.validate()?;
        if self.state.phase.is_active() {
            info!("Canceling {} job to start a new one", self.state.phase);
            self.abort(sink);
        }
        self.cancel.clear();

        if self.engine.kind() == settings.fill_strategy {
            self.engine.reset();
        } else {
            self.engine = FillEngine::new(settings.fill_strategy);
        }
        self.tracer = StrokeTracer::new(&settings);
        self.streamer = MotionStreamer::new();
        self.settings = settings;

        let source = FlatScene::new(scene, &self.settings);
        let working = source.trace_layer();
        info!(
            "Starting job: {} paths, {} fill",
            source.len(),
            self.settings.fill_strategy
        );
        self.tracer.begin(working.len());
        self.state = RunState {
            phase: Phase::Tracing,
            total: working.len(),
            source,
            working,
            ..RunState::default()
        };
        sink.emit(PlotEvent::status(
            format!("Tracing strokes 1/{}", self.state.total),
            true,
        ));
        sink.emit(PlotEvent::Progress {
            completed: 0,
            total: self.state.total,
        });
        Ok(())
    }

    fn steps_per_tick(&self) -> usize {
        match self.state.phase {
            Phase::Filling => self.settings.steps_per_tick * self.engine.tick_multiplier(),
            _ => self.settings.steps_per_tick,
        }
    }

    /// Drop the job's layers and signal cancellation.
    fn abort(&mut self, sink: &mut dyn EventSink) {
        self.state = RunState {
            phase: Phase::Canceled,
            ..RunState::default()
        };
        self.engine.reset();
        sink.emit(PlotEvent::Canceled);
    }

    fn enter(&mut self, phase: Phase, total: usize) {
        debug!("Phase {} -> {} ({} units)", self.state.phase, phase, total);
        self.state.phase = phase;
        self.state.completed = 0;
        self.state.total = total;
    }

    /// Advance the job by one bounded slice of work; returns the phase after.
    pub fn tick(&mut self, sink: &mut dyn EventSink) -> Phase {
        if !self.state.phase.is_active() {
            return self.state.phase;
        }
        if self.cancel.is_canceled() {
            info!("Job canceled during {}", self.state.phase);
            self.abort(sink);
            return self.state.phase;
        }

        match self.state.phase {
            Phase::Tracing => self.tick_tracing(sink),
            Phase::FillSetup => self.tick_fill_setup(sink),
            Phase::Filling => self.tick_filling(sink),
            Phase::Sequencing => self.tick_sequencing(sink),
            Phase::Streaming => self.tick_streaming(sink),
            Phase::Idle | Phase::Done | Phase::Canceled => {}
        }
        self.state.phase
    }

    fn tick_tracing(&mut self, sink: &mut dyn EventSink) {
        let before = self.tracer.processed();
        let mut more = true;
        for _ in 0..self.steps_per_tick() {
            more = self
                .tracer
                .step(&mut self.state.working, &mut self.state.action);
            if !more {
                break;
            }
        }

        let processed = self.tracer.processed();
        self.state.completed = processed;
        self.state.total = self.tracer.total();
        if processed != before && more {
            sink.emit(PlotEvent::status(
                format!("Tracing strokes {}/{}", processed + 1, self.state.total),
                true,
            ));
        }
        sink.emit(PlotEvent::Progress {
            completed: processed,
            total: self.state.total,
        });
        if !more {
            let preparer = FillPreparer::new(self.state.source.fill_layer(), self.settings.debug);
            self.enter(Phase::FillSetup, preparer.total());
            self.state.preparer = Some(preparer);
        }
    }

    /// Cut occluded area from up to `steps_per_tick` fill paths, then hand
    /// the prepared layer to the fill engine.
    fn tick_fill_setup(&mut self, sink: &mut dyn EventSink) {
        let steps = self.steps_per_tick();
        let preparer = self.state.preparer.get_or_insert_with(FillPreparer::default);
        for _ in 0..steps {
            if !preparer.step() {
                break;
            }
        }
        self.state.completed = preparer.processed();
        if !preparer.is_done() {
            sink.emit(PlotEvent::Progress {
                completed: self.state.completed,
                total: self.state.total,
            });
            return;
        }

        let working = self
            .state
            .preparer
            .take()
            .map(FillPreparer::finish)
            .unwrap_or_default();
        self.engine.setup(&self.settings);
        let total = self.engine.step_max(working.len());
        self.state.working = working;
        self.enter(Phase::Filling, total);
        sink.emit(PlotEvent::status(
            format!("Filling 1/{}", self.state.working.len().max(1)),
            true,
        ));
        sink.emit(PlotEvent::Progress {
            completed: 0,
            total,
        });
    }

    fn tick_filling(&mut self, sink: &mut dyn EventSink) {
        let remaining = self.state.working.len();
        for _ in 0..self.steps_per_tick() {
            if self.state.working.is_empty() {
                break;
            }
            self.engine
                .fill_step(&mut self.state.working, &mut self.state.action);
        }

        self.state.completed = self.engine.completed_steps().min(self.state.total);
        if self.state.working.len() != remaining && !self.state.working.is_empty() {
            let filled = self.engine.step_max(1).max(1);
            sink.emit(PlotEvent::status(
                format!(
                    "Filling {}/{}",
                    self.state.completed / filled + 1,
                    self.state.total / filled
                ),
                true,
            ));
        }
        sink.emit(PlotEvent::Progress {
            completed: self.state.completed,
            total: self.state.total,
        });
        if self.state.working.is_empty() {
            self.enter(Phase::Sequencing, 1);
        }
    }

    fn tick_sequencing(&mut self, sink: &mut dyn EventSink) {
        let paths = self.state.action.take();
        self.state.ordered = sequence(paths, &self.settings.palette);
        self.state.cursor = 0;
        let total = self.state.ordered.len();
        self.enter(Phase::Streaming, total);
        sink.emit(PlotEvent::status(
            format!("Streaming {} polylines", total),
            true,
        ));
        sink.emit(PlotEvent::Progress {
            completed: 0,
            total,
        });
    }

    /// Render the next polylines into the pending buffer.
    ///
    /// Nothing reaches the sink as motion until the last polyline is
    /// rendered, so a cancel observed on any earlier tick emits no motion.
    fn tick_streaming(&mut self, sink: &mut dyn EventSink) {
        for _ in 0..self.steps_per_tick() {
            let Some(path) = self.state.ordered.get(self.state.cursor) else {
                break;
            };
            self.streamer.stream_path(path, &mut self.state.pending);
            self.state.cursor += 1;
        }
        self.state.completed = self.state.cursor;
        sink.emit(PlotEvent::Progress {
            completed: self.state.completed,
            total: self.state.total,
        });
        if self.state.cursor >= self.state.ordered.len() {
            info!(
                "Job complete: {} polylines, {} motion commands",
                self.state.ordered.len(),
                self.streamer.emitted()
            );
            self.state.working.clear();
            for event in self.state.pending.drain(..) {
                sink.emit(event);
            }
            self.state.phase = Phase::Done;
            sink.emit(PlotEvent::Complete);
        }
    }

    /// Tick until the job ends. Returns the terminal phase.
    pub fn run_to_completion(&mut self, sink: &mut dyn EventSink) -> Phase {
        while self.state.phase.is_active() {
            self.tick(sink);
        }
        self.state.phase
    }
}

/// Run a whole job synchronously.
pub fn plot(scene: &Scene, settings: PlotSettings, sink: &mut dyn EventSink) -> Result<Phase, ConfigError> {
    let mut driver = PlotDriver::new();
    driver.start(scene, settings, sink)?;
    Ok(driver.run_to_completion(sink))
}
