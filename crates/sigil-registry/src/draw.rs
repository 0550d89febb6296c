//! Capture of an in-progress drawing.
//!
//! The caller feeds the grid cell under the cursor to [`SigilDraw::hover`]
//! every time it changes. The session only records moves that can still end
//! in a valid sigil, so [`SigilDraw::finish`] fails only for drawings that are
//! too short.

use sigil_canonical::{encode_points, Canonicalizer, SigilKey, SigilPoint, MAX_SIGIL_LENGTH};
use tracing::debug;

/// Outcome of feeding one cell to a [`SigilDraw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStep {
    /// The first point was recorded.
    Started,
    /// A line to the cell was added.
    Extended,
    /// The cell was the previous point, so the last line was undone.
    Retracted,
    /// Nothing changed.
    Ignored,
}

/// State of one drawing.
#[derive(Debug, Clone, Default)]
pub struct SigilDraw {
    canonicalizer: Canonicalizer,
    drawing: bool,
    points: Vec<SigilPoint>,
}

impl SigilDraw {
    /// Creates an idle session on the default grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle session that validates with `canonicalizer`.
    pub fn with_canonicalizer(canonicalizer: Canonicalizer) -> Self {
        Self {
            canonicalizer,
            ..Self::default()
        }
    }

    /// Starts a new drawing, discarding any points already recorded.
    pub fn begin(&mut self) {
        self.drawing = true;
        self.points.clear();
    }

    /// Returns true between [`SigilDraw::begin`] and [`SigilDraw::finish`] or [`SigilDraw::cancel`].
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points recorded so far.
    pub fn points(&self) -> &[SigilPoint] {
        &self.points
    }

    /// Records the cell now under the cursor.
    ///
    /// Moving back onto the second-to-last point retracts the last one, even
    /// once the drawing holds the maximum number of points. Only extending a
    /// full drawing is ignored.
    pub fn hover(&mut self, cell: SigilPoint) -> DrawStep {
        let grid = self.canonicalizer.grid().get();
        if !self.drawing || cell.x >= grid || cell.y >= grid {
            return DrawStep::Ignored;
        }

        let Some(&last) = self.points.last() else {
            self.points.push(cell);
            return DrawStep::Started;
        };
        if !last.is_adjacent_to(cell) {
            return DrawStep::Ignored;
        }

        let len = self.points.len();
        if len >= 2 && self.points[len - 2] == cell {
            self.points.pop();
            return DrawStep::Retracted;
        }

        if len >= MAX_SIGIL_LENGTH || self.has_line(last, cell) {
            return DrawStep::Ignored;
        }

        self.points.push(cell);
        DrawStep::Extended
    }

    /// Stops drawing and returns the key of what was drawn.
    ///
    /// Returns `None` if no drawing was in progress or the drawing is not a
    /// valid sigil. The recorded points are cleared either way.
    pub fn finish(&mut self) -> Option<SigilKey> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;

        let points = std::mem::take(&mut self.points);
        let key = self.canonicalizer.canonicalize(&encode_points(&points));
        debug!(len = points.len(), valid = key.is_some(), "sigil drawing finished");
        key
    }

    /// Stops drawing and discards the recorded points.
    pub fn cancel(&mut self) {
        self.drawing = false;
        self.points.clear();
    }

    /// Returns true if a line between `a` and `b` was already drawn, in either direction.
    fn has_line(&self, a: SigilPoint, b: SigilPoint) -> bool {
        self.points
            .windows(2)
            .any(|pair| (pair[0] == a && pair[1] == b) || (pair[0] == b && pair[1] == a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_canonical::{canonicalize, GridSize};

    fn p(x: u8, y: u8) -> SigilPoint {
        SigilPoint::new(x, y)
    }

    fn draw(cells: &[(u8, u8)]) -> SigilDraw {
        let mut session = SigilDraw::new();
        session.begin();
        for &(x, y) in cells {
            session.hover(p(x, y));
        }
        session
    }

    #[test]
    fn idle_session_ignores_input() {
        let mut session = SigilDraw::new();
        assert_eq!(session.hover(p(0, 0)), DrawStep::Ignored);
        assert!(session.points().is_empty());
        assert!(session.finish().is_none());
    }

    #[test]
    fn steps_are_reported() {
        let mut session = SigilDraw::new();
        session.begin();
        assert_eq!(session.hover(p(1, 1)), DrawStep::Started);
        assert_eq!(session.hover(p(1, 1)), DrawStep::Ignored);
        assert_eq!(session.hover(p(3, 3)), DrawStep::Ignored);
        assert_eq!(session.hover(p(2, 2)), DrawStep::Extended);
        assert_eq!(session.hover(p(1, 1)), DrawStep::Retracted);
        assert_eq!(session.points(), &[p(1, 1)]);
        assert_eq!(session.hover(p(4, 1)), DrawStep::Ignored);
    }

    #[test]
    fn redrawing_a_line_is_ignored() {
        // Square back to the start, then try to walk the first side again.
        let mut session = draw(&[(0, 0), (1, 0), (1, 1), (0, 1), (0, 0)]);
        assert_eq!(session.hover(p(1, 0)), DrawStep::Ignored);
        assert_eq!(session.points().len(), 5);
    }

    #[test]
    fn finish_returns_the_canonical_key() {
        let mut session = draw(&[(0, 2), (0, 1), (0, 0)]);
        let key = session.finish().unwrap();

        let expected = canonicalize(&[0x00, 0x01, 0x02]).unwrap();
        assert_eq!(key, expected);
        assert!(!session.is_drawing());
        assert!(session.points().is_empty());
    }

    #[test]
    fn single_point_does_not_finish() {
        let mut session = draw(&[(2, 2)]);
        assert!(session.finish().is_none());
    }

    #[test]
    fn full_drawing_stops_growing_but_can_retract() {
        let mut session = SigilDraw::new();
        session.begin();
        // 32 points without drawing any line twice.
        let trail = [
            (0, 0), (0, 1), (0, 2), (0, 3), (1, 2), (0, 1), (1, 0), (0, 0), (1, 1), (0, 2),
            (1, 2), (1, 1), (1, 0), (2, 0), (1, 1), (2, 1), (1, 2), (1, 3), (2, 2), (1, 2),
            (2, 3), (2, 2), (2, 1), (2, 0), (3, 0), (2, 1), (3, 1), (2, 2), (3, 2), (2, 3),
            (1, 3), (0, 2),
        ];
        for &(x, y) in &trail {
            assert_ne!(session.hover(p(x, y)), DrawStep::Ignored, "({x}, {y})");
        }
        assert_eq!(session.points().len(), MAX_SIGIL_LENGTH);
        assert_eq!(session.hover(p(0, 3)), DrawStep::Ignored);
        assert_eq!(session.hover(p(1, 3)), DrawStep::Retracted);
        assert!(session.finish().is_some());
    }

    #[test]
    fn cancel_discards() {
        let mut session = draw(&[(0, 0), (1, 1)]);
        session.cancel();
        assert!(!session.is_drawing());
        assert!(session.points().is_empty());
        assert!(session.finish().is_none());
    }

    #[test]
    fn configured_grid_bounds_input() {
        let mut session = SigilDraw::with_canonicalizer(Canonicalizer::new(GridSize::new(8).unwrap()));
        session.begin();
        assert_eq!(session.hover(p(6, 6)), DrawStep::Started);
        assert_eq!(session.hover(p(7, 7)), DrawStep::Extended);
        assert_eq!(session.hover(p(8, 8)), DrawStep::Ignored);
        assert!(session.finish().is_some());
    }
}
