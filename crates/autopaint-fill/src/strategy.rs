//! Fill strategy interface and the closed set of strategies.

use crate::hatch::HatchFill;
use crate::overlay::OverlayFill;
use crate::pocket::PocketFill;
use autopaint_core::{Diagnostic, FillStrategyKind, Layer, PlotSettings};

/// One area-filling algorithm.
///
/// A strategy always works on the bottom path of the working layer and writes
/// finished polylines to the action layer.
pub trait FillStrategy {
    /// One-time initialization for a job.
    fn setup(&mut self, settings: &PlotSettings);

    /// Total steps needed for `path_count` fill paths, for progress scaling.
    fn step_max(&self, path_count: usize) -> usize;

    /// Do one bounded unit of work on working-layer path 0.
    ///
    /// Returns `false` exactly when that path was consumed and removed (or the
    /// layer was already empty).
    fn fill_step(&mut self, working: &mut Layer, action: &mut Layer) -> bool;

    /// Progress units finished so far in this job.
    fn completed_steps(&self) -> usize;

    /// Drop precomputed geometry and per-job state.
    fn reset(&mut self);

    /// Scale applied to the driver's steps per tick.
    fn tick_multiplier(&self) -> usize {
        1
    }
}

/// The fill strategy selected for a job.
#[derive(Debug)]
pub enum FillEngine {
    Hatch(HatchFill),
    Pocket(PocketFill),
    Overlay(OverlayFill),
}

impl FillEngine {
    pub fn new(kind: FillStrategyKind) -> Self {
        match kind {
            FillStrategyKind::Hatch => FillEngine::Hatch(HatchFill::new()),
            FillStrategyKind::Pocket => FillEngine::Pocket(PocketFill::new()),
            FillStrategyKind::Overlay => FillEngine::Overlay(OverlayFill::new()),
        }
    }

    pub fn kind(&self) -> FillStrategyKind {
        match self {
            FillEngine::Hatch(_) => FillStrategyKind::Hatch,
            FillEngine::Pocket(_) => FillStrategyKind::Pocket,
            FillEngine::Overlay(_) => FillStrategyKind::Overlay,
        }
    }

    fn inner(&self) -> &dyn FillStrategy {
        match self {
            FillEngine::Hatch(s) => s,
            FillEngine::Pocket(s) => s,
            FillEngine::Overlay(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn FillStrategy {
        match self {
            FillEngine::Hatch(s) => s,
            FillEngine::Pocket(s) => s,
            FillEngine::Overlay(s) => s,
        }
    }
}

impl FillStrategy for FillEngine {
    fn setup(&mut self, settings: &PlotSettings) {
        self.inner_mut().setup(settings)
    }

    fn step_max(&self, path_count: usize) -> usize {
        self.inner().step_max(path_count)
    }

    fn fill_step(&mut self, working: &mut Layer, action: &mut Layer) -> bool {
        self.inner_mut().fill_step(working, action)
    }

    fn completed_steps(&self) -> usize {
        self.inner().completed_steps()
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }

    fn tick_multiplier(&self) -> usize {
        self.inner().tick_multiplier()
    }
}

/// Remove path 0 if it cannot be filled: background tool, or zero-area bounds.
///
/// Returns true when a path was removed.
pub(crate) fn discard_unfillable(working: &mut Layer, debug: bool) -> bool {
    let Some(path) = working.get(0) else {
        return false;
    };
    if path.tool.is_none_or(|t| t.is_background()) {
        working.remove(0);
        return true;
    }
    let degenerate = path.bounds().is_none_or(|b| b.is_degenerate());
    if degenerate {
        Diagnostic::degenerate(path.name.clone(), "zero-area fill bounds").report(debug);
        working.remove(0);
        return true;
    }
    false
}
