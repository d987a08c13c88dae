//! Hatch line fill
//!
//! Parallel sweep lines at the fill angle are intersected with the path. The
//! chords they cut are bucketed into groups by proximity, then each group is
//! joined end-to-start into as few polylines as the shape allows.
//!
//! Work is split in two phases so a large shape never blocks a tick: one
//! sweep line per step while sampling, then one chord per step while joining.

use crate::strategy::{discard_unfillable, FillStrategy};
use autopaint_core::{
    Bounds, Diagnostic, Layer, PathRole, PlotSettings, Point, VectorPath,
};
use tracing::debug;

/// A straight piece of a sweep line lying inside the fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chord {
    pub start: Point,
    pub end: Point,
}

/// Where the sweep lines for one path start and how far apart they are.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SweepPlan {
    start: Point,
    step: Point,
    iterations: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    /// Nothing started for the current path.
    Idle,
    Sweeping { plan: SweepPlan, index: usize },
    Joining { group: usize, chord: usize },
}

#[derive(Debug, Clone)]
pub struct HatchFill {
    spacing: f64,
    angle: f64,
    threshold: f64,
    join_crossings: usize,
    view: Bounds,
    debug: bool,
    phase: Phase,
    groups: Vec<Vec<Chord>>,
    chain: Option<VectorPath>,
    completed: usize,
}

impl Default for HatchFill {
    fn default() -> Self {
        Self::new()
    }
}

impl HatchFill {
    pub fn new() -> Self {
        let defaults = PlotSettings::default();
        Self {
            spacing: defaults.fill_spacing,
            angle: defaults.fill_angle,
            threshold: defaults.fill_threshold,
            join_crossings: defaults.hatch_join_crossings,
            view: defaults.view_bounds(),
            debug: false,
            phase: Phase::Idle,
            groups: Vec::new(),
            chain: None,
            completed: 0,
        }
    }

    /// Chord groups collected so far for the current path.
    pub fn groups(&self) -> &[Vec<Chord>] {
        &self.groups
    }

    fn plan(&self, path: &VectorPath) -> Option<SweepPlan> {
        let bounds = path.bounds()?;
        let center = path.position();
        // sweep across the bounding ellipse along the line normal
        let normal = Point::from_angle(self.angle + 90.0);
        let reach = Point::new(bounds.width() * normal.x, bounds.height() * normal.y);
        let start = center - reach;
        let vector = reach * 2.0;
        let iterations = (vector.length() / self.spacing).floor() as usize;
        (iterations > 0).then(|| SweepPlan {
            start,
            step: vector / iterations as f64,
            iterations,
        })
    }

    /// Intersections of one sweep line with the path, clamped to the view.
    fn sweep(&self, path: &VectorPath, origin: Point) -> Vec<Point> {
        let hits = path.line_crossings(origin, self.angle);
        let view_path = VectorPath::rectangle("view", &self.view);
        let view_hits = view_path.line_crossings(origin, self.angle);
        clamp_to_view(&hits, &view_hits, &self.view)
    }

    /// Index of the group whose last chord starts nearest `start`, or a new one.
    fn group_for(&self, start: &Point) -> usize {
        let mut best = None;
        let mut best_distance = f64::INFINITY;
        for (i, group) in self.groups.iter().enumerate() {
            if let Some(last) = group.last() {
                let d = last.start.distance_to(start);
                if d <= self.threshold && d < best_distance {
                    best = Some(i);
                    best_distance = d;
                }
            }
        }
        best.unwrap_or(self.groups.len())
    }

    fn sweep_step(&mut self, path: &VectorPath, plan: SweepPlan, index: usize) {
        let origin = plan.start + plan.step * index as f64;
        let hits = self.sweep(path, origin);
        if hits.len() % 2 != 0 {
            debug!(
                "Discarding odd intersection set ({}) on '{}'",
                hits.len(),
                path.name
            );
        } else {
            for pair in hits.chunks_exact(2) {
                let chord = Chord {
                    start: pair[0],
                    end: pair[1],
                };
                let g = self.group_for(&chord.start);
                if g == self.groups.len() {
                    self.groups.push(Vec::new());
                }
                self.groups[g].push(chord);
            }
        }

        if index + 1 >= plan.iterations {
            self.completed += 1;
            self.phase = Phase::Joining { group: 0, chord: 0 };
        } else {
            self.phase = Phase::Sweeping {
                plan,
                index: index + 1,
            };
        }
    }

    /// Handle one chord; returns true when the path is finished.
    fn join_step(&mut self, path: &VectorPath, action: &mut Layer, group: usize, chord: usize) -> bool {
        let Some(c) = self.groups.get(group).and_then(|g| g.get(chord)).copied() else {
            return true;
        };

        let joined = self
            .chain
            .as_ref()
            .and_then(|chain| chain.last_point())
            .is_some_and(|from| self.can_join(path, from, c.start));
        if joined {
            if let Some(chain) = self.chain.as_mut() {
                chain.push_point(c.start);
                chain.push_point(c.end);
            }
        } else {
            if let Some(done) = self.chain.take() {
                action.push(done);
            }
            let mut chain = VectorPath::polyline(path.name.clone(), path.tool, PathRole::Fill);
            chain.push_point(c.start);
            chain.push_point(c.end);
            self.chain = Some(chain);
        }

        let group_len = self.groups[group].len();
        if chord + 1 < group_len {
            self.phase = Phase::Joining {
                group,
                chord: chord + 1,
            };
            return false;
        }

        // end of group: its chain is complete
        if let Some(done) = self.chain.take() {
            action.push(done);
        }
        if group + 1 < self.groups.len() {
            self.phase = Phase::Joining {
                group: group + 1,
                chord: 0,
            };
            false
        } else {
            true
        }
    }

    /// A connector is kept only if it stays inside the fill.
    fn can_join(&self, path: &VectorPath, from: Point, to: Point) -> bool {
        let mid = from.lerp(&to, 0.5);
        path.contains(&mid) && path.segment_intersections(from, to).len() <= self.join_crossings
    }

    fn finish_path(&mut self, working: &mut Layer) {
        self.completed += 1;
        self.phase = Phase::Idle;
        self.groups.clear();
        self.chain = None;
        working.remove(0);
    }
}

/// Replace out-of-view points by the nearest view boundary crossing, or drop
/// them when the sweep line never enters the view.
pub(crate) fn clamp_to_view(hits: &[Point], view_hits: &[Point], view: &Bounds) -> Vec<Point> {
    hits.iter()
        .filter_map(|p| {
            if view.contains(p) {
                Some(*p)
            } else {
                view_hits
                    .iter()
                    .min_by(|a, b| a.distance_to(p).total_cmp(&b.distance_to(p)))
                    .copied()
            }
        })
        .collect()
}

impl FillStrategy for HatchFill {
    fn setup(&mut self, settings: &PlotSettings) {
        self.spacing = settings.fill_spacing;
        self.angle = settings.fill_angle;
        self.threshold = settings.fill_threshold;
        self.join_crossings = settings.hatch_join_crossings;
        self.view = settings.view_bounds();
        self.debug = settings.debug;
    }

    fn step_max(&self, path_count: usize) -> usize {
        path_count * 2
    }

    fn fill_step(&mut self, working: &mut Layer, action: &mut Layer) -> bool {
        if self.phase == Phase::Idle && discard_unfillable(working, self.debug) {
            self.completed += 2;
            return false;
        }
        let Some(path) = working.get(0) else {
            return false;
        };

        let finished = match self.phase.clone() {
            Phase::Idle => match self.plan(path) {
                Some(plan) => {
                    self.sweep_step(path, plan, 0);
                    false
                }
                None => {
                    Diagnostic::incomplete(path.name.clone(), "no sweep line fits the shape")
                        .report(self.debug);
                    self.completed += 1;
                    true
                }
            },
            Phase::Sweeping { plan, index } => {
                self.sweep_step(path, plan, index);
                false
            }
            Phase::Joining { group, chord } => {
                if self.groups.is_empty() {
                    Diagnostic::incomplete(path.name.clone(), "no sweep line touched the shape")
                        .report(self.debug);
                    true
                } else if self.join_step(path, action, group, chord) {
                    debug!("Hatch fill of '{}' finished", path.name);
                    true
                } else {
                    false
                }
            }
        };
        if finished {
            self.finish_path(working);
        }
        !finished
    }

    fn completed_steps(&self) -> usize {
        self.completed
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.groups.clear();
        self.chain = None;
        self.completed = 0;
    }
}
