use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::common::{CollectiveState, Position};

/// Fixed-capacity interning store for collective states.
///
/// Direct-mapped: the content hash selects one slot. A hit hands out the
/// canonical instance, a miss allocates a new state and overwrites the slot.
#[derive(Debug)]
pub struct InternCache {
    slots: Vec<Option<CollectiveState>>,
    hits: usize,
    misses: usize,
}

impl InternCache {
    pub fn new(capacity: usize) -> Self {
        InternCache {
            slots: vec![None; capacity.max(1)],
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, positions: &[Position]) -> CollectiveState {
        let mut hasher = DefaultHasher::new();
        positions.hash(&mut hasher);
        let slot = (hasher.finish() % self.slots.len() as u64) as usize;

        if let Some(state) = &self.slots[slot] {
            if state.positions() == positions {
                self.hits += 1;
                return state.clone();
            }
        }

        self.misses += 1;
        let state = CollectiveState::new(positions);
        self.slots[slot] = Some(state.clone());
        state
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Per-expansion record of the moves chosen so far for a prefix of entities.
///
/// Holds the uniqueness cache (destinations already claimed) and the
/// transition cache (which entity started in which cell, and where each
/// placed entity is going). Lives for one neighbor generation call.
pub(crate) struct MoveCheck<'a> {
    source: &'a [Position],
    origins: HashMap<Position, usize>,
    claimed: HashMap<Position, usize>,
    chosen: Vec<Option<Position>>,
}

impl<'a> MoveCheck<'a> {
    pub(crate) fn new(source: &'a [Position]) -> Self {
        MoveCheck {
            source,
            origins: source
                .iter()
                .enumerate()
                .map(|(entity, &cell)| (cell, entity))
                .collect(),
            claimed: HashMap::with_capacity(source.len()),
            chosen: vec![None; source.len()],
        }
    }

    /// Places `entity` on `to` if that keeps the prefix collision free.
    pub(crate) fn try_place(&mut self, entity: usize, to: Position) -> bool {
        let from = self.source[entity];

        if self.claimed.contains_key(&to) {
            return false;
        }

        // Two entities swapping cells.
        if to != from && self.chosen_move_of(to) == Some(from) {
            return false;
        }

        // Two diagonal moves crossing inside the same 2x2 block.
        if to.row != from.row && to.col != from.col {
            let corner = Position::new(from.row, to.col);
            let opposite = Position::new(to.row, from.col);
            if self.chosen_move_of(corner) == Some(opposite) {
                return false;
            }
        }

        self.claimed.insert(to, entity);
        self.chosen[entity] = Some(to);
        true
    }

    pub(crate) fn release(&mut self, entity: usize) {
        if let Some(to) = self.chosen[entity].take() {
            self.claimed.remove(&to);
        }
    }

    fn chosen_move_of(&self, origin: Position) -> Option<Position> {
        self.origins
            .get(&origin)
            .and_then(|&entity| self.chosen[entity])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_returns_canonical_instance() {
        let mut cache = InternCache::new(4);
        let positions = [Position::new(0, 0), Position::new(1, 2)];

        let first = cache.get(&positions);
        let second = cache.get(&positions);
        assert!(first.ptr_eq(&second));
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_intern_capacity_is_bounded() {
        let mut cache = InternCache::new(1);
        let a = cache.get(&[Position::new(0, 0)]);
        let b = cache.get(&[Position::new(0, 1)]);
        let a_again = cache.get(&[Position::new(0, 0)]);

        assert_eq!(cache.capacity(), 1);
        assert!(!a.ptr_eq(&b));
        // The single slot was overwritten by `b`.
        assert!(!a.ptr_eq(&a_again));
        assert_eq!(a, a_again);
        assert_eq!(cache.misses(), 3);
        assert_eq!(InternCache::new(0).capacity(), 1);
    }

    #[test]
    fn test_move_check_rejects_shared_destination() {
        let source = [Position::new(0, 0), Position::new(0, 2)];
        let mut check = MoveCheck::new(&source);

        assert!(check.try_place(0, Position::new(0, 1)));
        assert!(!check.try_place(1, Position::new(0, 1)));
        check.release(0);
        assert!(check.try_place(1, Position::new(0, 1)));
    }

    #[test]
    fn test_move_check_rejects_swap() {
        let source = [Position::new(0, 0), Position::new(0, 1)];
        let mut check = MoveCheck::new(&source);

        assert!(check.try_place(0, Position::new(0, 1)));
        assert!(!check.try_place(1, Position::new(0, 0)));
        // Following into a vacated cell is fine.
        assert!(check.try_place(1, Position::new(0, 2)));
    }

    #[test]
    fn test_move_check_rejects_diagonal_crossing() {
        let source = [Position::new(0, 0), Position::new(0, 1)];
        let mut check = MoveCheck::new(&source);

        assert!(check.try_place(0, Position::new(1, 1)));
        assert!(!check.try_place(1, Position::new(1, 0)));
        assert!(check.try_place(1, Position::new(0, 2)));
    }
}
