use serde::Serialize;

/// Flattened pixel landmarks for one image: `[x0, y0, x1, y1, ...]`.
///
/// Only whole pairs can be appended, so the length is always even.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    values: Vec<i32>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, x: i32, y: i32) {
        self.values.push(x);
        self.values.push(y);
    }

    /// Number of coordinate values (twice the number of points).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.values.len() / 2
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }

    pub fn pairs(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.values.chunks_exact(2).map(|p| (p[0], p[1]))
    }

    pub fn is_sufficient(&self, min_values: usize) -> bool {
        self.values.len() >= min_values
    }
}

impl FromIterator<(i32, i32)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (i32, i32)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<(i32, i32)> for LandmarkSet {
    fn extend<I: IntoIterator<Item = (i32, i32)>>(&mut self, iter: I) {
        for (x, y) in iter {
            self.push(x, y);
        }
    }
}
