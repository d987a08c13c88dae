//! Stroke tracing
//!
//! Walks the outline of the bottom working path in fixed steps and keeps
//! only the samples where that path is frontmost. Everything drawn later in
//! the scene sits above it in the layer, so hit-testing the whole working
//! layer resolves occlusion.

use autopaint_core::geometry::EPSILON;
use autopaint_core::{Diagnostic, Hit, HitOptions, Layer, PathRole, PlotSettings, Point, VectorPath};
use tracing::debug;

/// What the last tracer step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    /// Sampled the current path and moved along it.
    Scanning,
    /// Unpacked a compound path into its components; nothing sampled.
    Splitting,
    /// Finished the current path and removed it.
    Closed,
}

#[derive(Debug, Clone)]
pub struct StrokeTracer {
    resolution: f64,
    line_width: f64,
    debug: bool,
    state: TraceState,
    position: f64,
    last_good: bool,
    last_hit: Option<Hit>,
    current: Option<VectorPath>,
    processed: usize,
    total: usize,
}

impl Default for StrokeTracer {
    fn default() -> Self {
        Self::new(&PlotSettings::default())
    }
}

impl StrokeTracer {
    pub fn new(settings: &PlotSettings) -> Self {
        Self {
            resolution: settings.flatten_resolution,
            line_width: settings.line_width,
            debug: settings.debug,
            state: TraceState::Closed,
            position: 0.0,
            last_good: false,
            last_hit: None,
            current: None,
            processed: 0,
            total: 0,
        }
    }

    /// Prepare for a fresh working layer of `path_count` paths.
    pub fn begin(&mut self, path_count: usize) {
        self.state = TraceState::Closed;
        self.reset_cursor();
        self.current = None;
        self.processed = 0;
        self.total = path_count;
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    /// Paths finished so far.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Paths in the job, counting split components separately.
    pub fn total(&self) -> usize {
        self.total
    }

    fn reset_cursor(&mut self) {
        self.position = 0.0;
        self.last_good = false;
        self.last_hit = None;
    }

    /// Move the open output polyline, if it has any points, to `action`.
    fn finalize(&mut self, action: &mut Layer) {
        if let Some(done) = self.current.take() {
            if !done.is_empty() {
                action.push(done);
            }
        }
    }

    fn record(&mut self, path: &VectorPath, point: Point) {
        self.current
            .get_or_insert_with(|| VectorPath::polyline(path.name.clone(), path.tool, PathRole::Stroke))
            .push_point(point);
    }

    /// Crossing between the current path and an occluder nearest `near`.
    ///
    /// Stroke-only occluders have no area to cross, so they never patch.
    fn patch(path: &VectorPath, working: &Layer, occluder: Option<Hit>, near: &Point) -> Option<Point> {
        let occluder = working.get(occluder?.index)?;
        occluder.fill?;
        path.closest_intersection(occluder, near)
    }

    fn remove_current(&mut self, working: &mut Layer, action: &mut Layer) {
        self.finalize(action);
        working.remove(0);
        self.processed += 1;
        self.reset_cursor();
        self.state = TraceState::Closed;
    }

    /// One bounded unit of work on working-layer path 0.
    ///
    /// Returns false once the working layer is empty.
    pub fn step(&mut self, working: &mut Layer, action: &mut Layer) -> bool {
        let Some(path) = working.get(0) else {
            return false;
        };

        if path.tool.is_none_or(|t| t.is_background()) {
            debug!("Skipping background path '{}'", path.name);
            self.remove_current(working, action);
            return true;
        }

        if path.is_compound() {
            let Some(compound) = working.remove(0) else {
                return false;
            };
            let mut components = compound.into_components();
            // components only outline their own ring
            for c in &mut components {
                c.fill = None;
            }
            self.total += components.len().saturating_sub(1);
            working.insert_many(0, components);
            self.state = TraceState::Splitting;
            return true;
        }

        let length = path.length();
        if length <= EPSILON {
            Diagnostic::degenerate(path.name.clone(), "zero-length path").report(self.debug);
            self.remove_current(working, action);
            return true;
        }

        self.state = TraceState::Scanning;
        let sample = path.point_at(self.position).unwrap_or(Point::ORIGIN);

        if working.len() == 1 {
            // nothing left that could cover it
            self.record(path, sample);
        } else {
            let hit = working.hit_test(&sample, &HitOptions::new(self.line_width));
            match hit {
                Some(h) if h.index == 0 => {
                    if !self.last_good {
                        if let Some(p) = Self::patch(path, working, self.last_hit, &sample) {
                            self.record(path, p);
                        }
                    }
                    self.record(path, sample);
                    self.last_good = true;
                }
                _ => {
                    if self.last_good {
                        if let Some(p) = Self::patch(path, working, hit, &sample) {
                            self.record(path, p);
                        }
                    }
                    self.finalize(action);
                    self.last_good = false;
                }
            }
            self.last_hit = hit;
        }

        if self.position >= length {
            debug!(
                "Traced '{}' ({}/{})",
                path.name,
                self.processed + 1,
                self.total
            );
            self.remove_current(working, action);
        } else {
            self.position = (self.position + self.resolution).min(length);
        }
        true
    }
}
