use std::collections::VecDeque;

use log::{debug, warn};

use crate::error::GridResult;
use crate::grid::{Grid, Snapshot};

/// Default depth of each history stack
pub const DEFAULT_MAX_HISTORY: usize = 256;

/// Whole-grid undo/redo history.
///
/// Step counts are the stack lengths; there are no separate counters to keep
/// in sync. Each stack is bounded and drops its oldest entry once full.
#[derive(Debug, Clone)]
pub struct History {
    /// Grid states that can be returned to with undo
    undo_stack: VecDeque<Snapshot>,
    /// Grid states that were undone and can be re-applied
    redo_stack: VecDeque<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl History {
    /// Creates an empty history holding at most `capacity` entries per stack
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Records the current grid as an undo point. Call once per gesture.
    pub fn save_state(&mut self, grid: &Grid) {
        push_bounded(&mut self.undo_stack, grid.snapshot(), self.capacity);
        debug!("Saved state ({} undo steps)", self.undo_stack.len());
    }

    /// Moves the current grid onto the redo stack and restores the latest
    /// undo point. Returns `Ok(false)` when there was nothing to undo.
    pub fn undo(&mut self, grid: &mut Grid) -> GridResult<bool> {
        let Some(previous) = self.undo_stack.pop_back() else {
            return Ok(false);
        };

        let current = grid.snapshot();
        if let Err(err) = grid.restore(previous.clone()) {
            warn!("Undo aborted: {}", err);
            self.undo_stack.push_back(previous);
            return Err(err);
        }
        push_bounded(&mut self.redo_stack, current, self.capacity);
        Ok(true)
    }

    /// Saves the current grid as an undo point and restores the latest redo
    /// entry. Returns `Ok(false)` when there was nothing to redo.
    pub fn redo(&mut self, grid: &mut Grid) -> GridResult<bool> {
        let Some(next) = self.redo_stack.pop_back() else {
            return Ok(false);
        };

        let current = grid.snapshot();
        if let Err(err) = grid.restore(next.clone()) {
            warn!("Redo aborted: {}", err);
            self.redo_stack.push_back(next);
            return Err(err);
        }
        push_bounded(&mut self.undo_stack, current, self.capacity);
        Ok(true)
    }

    /// Empties both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_steps(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_steps(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, capacity: usize) {
    if stack.len() == capacity {
        stack.pop_front();
    }
    stack.push_back(snapshot);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::grid::Coord;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut grid = Grid::new(3, Color::WHITE).unwrap();
        grid.set(Coord::new(0, 0), RED).unwrap();
        let before = grid.clone();

        let mut history = History::default();
        assert_eq!(history.undo(&mut grid), Ok(false));
        assert_eq!(history.redo(&mut grid), Ok(false));
        assert_eq!(grid, before);
        assert_eq!((history.undo_steps(), history.redo_steps()), (0, 0));
    }

    #[test]
    fn undo_moves_current_state_to_redo() {
        let mut grid = Grid::new(3, Color::WHITE).unwrap();
        let mut history = History::default();

        history.save_state(&grid);
        grid.set(Coord::new(1, 1), RED).unwrap();

        assert_eq!(history.undo(&mut grid), Ok(true));
        assert_eq!(grid.get(Coord::new(1, 1)).unwrap(), Color::WHITE);
        assert_eq!((history.undo_steps(), history.redo_steps()), (0, 1));

        assert_eq!(history.redo(&mut grid), Ok(true));
        assert_eq!(grid.get(Coord::new(1, 1)).unwrap(), RED);
        assert_eq!((history.undo_steps(), history.redo_steps()), (1, 0));
    }

    #[test]
    fn redo_saves_state_before_restoring() {
        let mut grid = Grid::new(2, Color::WHITE).unwrap();
        let mut history = History::default();

        history.save_state(&grid);
        grid.set(Coord::new(0, 0), RED).unwrap();
        history.undo(&mut grid).unwrap();

        // Redo pushes the pre-redo grid, so a second undo returns to it
        history.redo(&mut grid).unwrap();
        history.undo(&mut grid).unwrap();
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), Color::WHITE);
    }

    #[test]
    fn stacks_are_bounded() {
        let mut grid = Grid::new(2, Color::WHITE).unwrap();
        let mut history = History::new(3);

        for i in 0..5u8 {
            history.save_state(&grid);
            grid.set(Coord::new(0, 0), Color::rgb(i, 0, 0)).unwrap();
        }
        assert_eq!(history.undo_steps(), 3);

        while history.undo(&mut grid).unwrap() {}
        // The oldest two states were dropped; we land on the third save
        assert_eq!(grid.get(Coord::new(0, 0)).unwrap(), Color::rgb(1, 0, 0));
        assert_eq!(history.redo_steps(), 3);
    }

    #[test]
    fn mismatched_snapshot_leaves_stacks_intact() {
        let mut grid = Grid::new(2, Color::WHITE).unwrap();
        let mut history = History::default();
        history.save_state(&grid);

        grid.resize(3, Color::WHITE).unwrap();
        assert!(history.undo(&mut grid).is_err());
        assert_eq!(history.undo_steps(), 1);
        assert_eq!(history.redo_steps(), 0);
    }

    #[test]
    fn clear_empties_both_stacks() {
        let mut grid = Grid::new(2, Color::WHITE).unwrap();
        let mut history = History::default();
        history.save_state(&grid);
        history.save_state(&grid);
        history.undo(&mut grid).unwrap();

        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(&mut grid), Ok(false));
    }
}
