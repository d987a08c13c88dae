//! Ordered path collections and hit-testing.

use crate::geometry::Point;
use crate::path::VectorPath;

/// How a hit-test matched a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// The point lies inside a filled path.
    Fill,
    /// The point lies on (within tolerance of) the outline.
    Stroke,
}

/// Result of a hit-test: which path was frontmost and how it was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub index: usize,
    pub kind: HitKind,
}

/// Hit-test options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOptions {
    pub fill: bool,
    pub stroke: bool,
    /// Stroke hit distance, normally half the line width.
    pub tolerance: f64,
}

impl HitOptions {
    pub fn new(line_width: f64) -> Self {
        Self {
            fill: true,
            stroke: true,
            tolerance: line_width / 2.0,
        }
    }

    pub fn fill_only() -> Self {
        Self {
            fill: true,
            stroke: false,
            tolerance: 0.0,
        }
    }
}

/// Ordered collection of paths. Index 0 is the bottom of the stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    paths: Vec<VectorPath>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[VectorPath] {
        &self.paths
    }

    pub fn get(&self, index: usize) -> Option<&VectorPath> {
        self.paths.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut VectorPath> {
        self.paths.get_mut(index)
    }

    /// Add a path on top.
    pub fn push(&mut self, path: VectorPath) {
        self.paths.push(path);
    }

    pub fn insert(&mut self, index: usize, path: VectorPath) {
        self.paths.insert(index.min(self.paths.len()), path);
    }

    /// Insert several paths at `index`, keeping their order.
    pub fn insert_many(&mut self, index: usize, paths: Vec<VectorPath>) {
        let at = index.min(self.paths.len());
        self.paths.splice(at..at, paths);
    }

    pub fn remove(&mut self, index: usize) -> Option<VectorPath> {
        (index < self.paths.len()).then(|| self.paths.remove(index))
    }

    pub fn retain(&mut self, f: impl FnMut(&VectorPath) -> bool) {
        self.paths.retain(f);
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn take(&mut self) -> Vec<VectorPath> {
        std::mem::take(&mut self.paths)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VectorPath> {
        self.paths.iter()
    }

    /// Frontmost path at `point`, walking from the top of the stack down.
    ///
    /// A fill hit needs a filled path containing the point; a stroke hit needs
    /// the point within `options.tolerance` of the outline. The result depends
    /// only on the layer contents and the point.
    pub fn hit_test(&self, point: &Point, options: &HitOptions) -> Option<Hit> {
        for (index, path) in self.paths.iter().enumerate().rev() {
            if options.fill && path.fill.is_some() && path.contains(point) {
                return Some(Hit {
                    index,
                    kind: HitKind::Fill,
                });
            }
            if options.stroke && path.distance_to_outline(point) <= options.tolerance {
                return Some(Hit {
                    index,
                    kind: HitKind::Stroke,
                });
            }
        }
        None
    }
}

impl From<Vec<VectorPath>> for Layer {
    fn from(paths: Vec<VectorPath>) -> Self {
        Self { paths }
    }
}

impl IntoIterator for Layer {
    type Item = VectorPath;
    type IntoIter = std::vec::IntoIter<VectorPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a VectorPath;
    type IntoIter = std::slice::Iter<'a, VectorPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
