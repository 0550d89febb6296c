use tracing::{debug, trace};

use crate::grid::GridSize;
use crate::key::{PersistedKeyError, SigilKey};
use crate::point;

/// Hard limit on the number of points in a sigil.
///
/// The occurrence table stores one bit per sequence index in a `u32`, so this
/// cannot grow without widening that table.
pub const MAX_SIGIL_LENGTH: usize = 32;

/// Fewest points a sigil may have.
pub const MIN_SIGIL_LENGTH: usize = 2;

/// Validates sigils and rewrites them into canonical order.
///
/// Canonicalization is pure: it works on a private copy of the input, keeps
/// no state between calls and may be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canonicalizer {
    grid: GridSize,
}

impl Canonicalizer {
    /// Creates a canonicalizer for the provided grid.
    pub fn new(grid: GridSize) -> Self {
        Self { grid }
    }

    /// Grid this canonicalizer validates against.
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Validates `sigil` and returns its canonical key.
    ///
    /// A sigil is valid when:
    /// - it has between [`MIN_SIGIL_LENGTH`] and [`MAX_SIGIL_LENGTH`] points
    /// - every point lies on the grid
    /// - consecutive points differ and are at most one cell apart on each axis
    /// - no line between two points is drawn more than once
    ///
    /// Drawings of the same shape produce equal keys regardless of the
    /// direction they were drawn in, the point a closed loop started at, or
    /// the orientation of any loop inside the drawing. `sigil` is never
    /// modified. Returns `None` for invalid input without saying which rule
    /// failed.
    pub fn canonicalize(&self, sigil: &[u8]) -> Option<SigilKey> {
        if !(MIN_SIGIL_LENGTH..=MAX_SIGIL_LENGTH).contains(&sigil.len()) {
            debug!(len = sigil.len(), "sigil rejected: length out of range");
            return None;
        }

        if !self.grid.contains(sigil[0]) {
            debug!(index = 0, point = sigil[0], "sigil rejected: point outside grid");
            return None;
        }

        for (index, pair) in sigil.windows(2).enumerate() {
            let (first, second) = (pair[0], pair[1]);
            if !self.grid.contains(second) {
                debug!(index = index + 1, point = second, "sigil rejected: point outside grid");
                return None;
            }
            if !point::is_step(first, second) {
                debug!(index = index + 1, "sigil rejected: consecutive points are not one step apart");
                return None;
            }
        }

        let occurrences = self.occurrence_table(sigil);
        if let Some((earlier, later)) = find_retraced_edge(sigil, &occurrences) {
            debug!(earlier, later, "sigil rejected: line drawn more than once");
            return None;
        }

        Some(SigilKey::from_canonical(smallest_trail(sigil)))
    }

    /// Re-runs canonicalization over bytes from an untrusted source.
    ///
    /// The returned key holds the canonicalizer's output, never the input
    /// bytes themselves.
    pub fn revalidate(&self, untrusted: &[u8]) -> Result<SigilKey, PersistedKeyError> {
        self.canonicalize(untrusted)
            .ok_or(PersistedKeyError::NotCanonical)
    }

    /// Builds a table, indexed by compact key, of the sequence indices holding each point.
    fn occurrence_table(&self, points: &[u8]) -> Vec<u32> {
        let mut table = vec![0u32; self.grid.cell_count()];
        for (index, &packed) in points.iter().enumerate() {
            table[self.grid.compact_key(packed)] |= 1 << index;
        }
        table
    }
}

/// Canonicalizes `sigil` on the default grid. See [`Canonicalizer::canonicalize`].
pub fn canonicalize(sigil: &[u8]) -> Option<SigilKey> {
    Canonicalizer::default().canonicalize(sigil)
}

/// Redraws the lines of a valid sigil in the smallest possible order.
///
/// Two drawings are the same shape when they draw the same set of lines
/// between the same end points, so the canonical form is the lexicographically
/// smallest way to draw those lines in one stroke. A closed loop starts on
/// its smallest point, an open path on its smaller end. From there the
/// smallest neighbour is taken whenever the lines not yet drawn stay
/// reachable from it; otherwise the stroke would strand them.
///
/// `sigil` must already have passed validation: every step is a single move
/// and no line appears twice.
fn smallest_trail(sigil: &[u8]) -> Vec<u8> {
    let last = sigil.len() - 1;
    let lines: Vec<(u8, u8)> = sigil
        .windows(2)
        .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
        .collect();

    let start = if sigil[0] == sigil[last] {
        sigil.iter().copied().min().unwrap_or(sigil[0])
    } else {
        sigil[0].min(sigil[last])
    };

    // At most MAX_SIGIL_LENGTH - 1 lines, so one bit each fits.
    let mut remaining = u32::MAX >> (32 - lines.len());
    let mut trail = Vec::with_capacity(sigil.len());
    trail.push(start);
    let mut current = start;

    while remaining != 0 {
        let mut candidates: Vec<(u8, usize)> = set_bits(remaining)
            .filter_map(|index| match lines[index] {
                (a, b) if a == current => Some((b, index)),
                (a, b) if b == current => Some((a, index)),
                _ => None,
            })
            .collect();
        candidates.sort_unstable();

        let mut chosen = None;
        for &(next, index) in &candidates {
            chosen = Some((next, index));
            if reaches_all(&lines, remaining & !(1 << index), next) {
                break;
            }
            trace!(from = current, to = next, "deferring line that would strand the rest");
        }
        let Some((next, index)) = chosen else {
            break;
        };

        remaining &= !(1 << index);
        trail.push(next);
        current = next;
    }

    trail
}

/// Returns true if every line in `remaining` can be reached from `from`
/// without lifting the pen.
fn reaches_all(lines: &[(u8, u8)], remaining: u32, from: u8) -> bool {
    let mut reached = 0u32;
    let mut frontier = vec![from];
    while let Some(point) = frontier.pop() {
        for index in set_bits(remaining & !reached) {
            let (a, b) = lines[index];
            if a == point || b == point {
                reached |= 1 << index;
                frontier.push(if a == point { b } else { a });
            }
        }
    }
    reached == remaining
}

/// Finds two occurrences of a point whose surrounding lines overlap.
///
/// Every line touching an occurrence of a point leads to one of its
/// neighbours in the sequence. If the neighbours around two occurrences are
/// not all distinct, some line through that point was drawn twice (in either
/// direction).
fn find_retraced_edge(points: &[u8], occurrences: &[u32]) -> Option<(usize, usize)> {
    for &mask in occurrences {
        if mask.count_ones() < 2 {
            continue;
        }

        let indices: Vec<usize> = set_bits(mask).collect();
        for (position, &earlier) in indices.iter().enumerate() {
            for &later in &indices[position + 1..] {
                if neighbours_repeat(points, earlier, later) {
                    return Some((earlier, later));
                }
            }
        }
    }
    None
}

fn neighbours_repeat(points: &[u8], earlier: usize, later: usize) -> bool {
    let mut neighbours = [0u8; 4];
    let mut count = 0;

    // `earlier < later`, so neither of these can fall off the sequence.
    let mut push = |packed: u8| {
        neighbours[count] = packed;
        count += 1;
    };
    push(points[earlier + 1]);
    push(points[later - 1]);
    if earlier > 0 {
        push(points[earlier - 1]);
    }
    if later + 1 < points.len() {
        push(points[later + 1]);
    }

    let seen = &mut neighbours[..count];
    seen.sort_unstable();
    seen.windows(2).any(|pair| pair[0] == pair[1])
}

fn set_bits(mut mask: u32) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if mask == 0 {
            return None;
        }
        let index = mask.trailing_zeros() as usize;
        mask &= mask - 1;
        Some(index)
    })
}
