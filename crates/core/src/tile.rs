//! Tile arena.
//!
//! Tiles live in a slot arena addressed by generational [`TileId`]s. Cells
//! hold ids, never references, so destroying a tile can not leave a cell
//! pointing at freed data: the stale id simply stops resolving.

use crate::types::{Position, TileKind};

/// Stable handle to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    index: u32,
    generation: u32,
}

impl TileId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// A typed, movable occupant of a usable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    /// Must always equal the coordinates of the owning cell.
    pub pos: Position,
    /// Transient scan flag.
    pub matched: bool,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    tile: Option<Tile>,
}

/// Generational slot arena of tiles.
#[derive(Debug, Clone, Default)]
pub struct TileArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl TileArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Allocate a tile and return its id.
    pub fn insert(&mut self, kind: TileKind, pos: Position) -> TileId {
        let index = match self.free.pop() {
            Some(i) => i,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    tile: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = TileId {
            index,
            generation: slot.generation,
        };
        slot.tile = Some(Tile {
            id,
            kind,
            pos,
            matched: false,
        });
        self.live += 1;
        id
    }

    /// Destroy a tile. Returns the tile if the id was live.
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let tile = slot.tile.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(tile)
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.tile.as_ref()
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.tile.as_mut()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live tiles.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Drop every tile. Outstanding ids become stale.
    pub fn clear(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if slot.tile.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
            }
        }
        self.live = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.slots.iter().filter_map(|s| s.tile.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.slots.iter_mut().filter_map(|s| s.tile.as_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut arena = TileArena::new();
        let id = arena.insert(TileKind::Red, Position::new(1, 2));
        let tile = arena.get(id).unwrap();
        assert_eq!(tile.kind, TileKind::Red);
        assert_eq!(tile.pos, Position::new(1, 2));
        assert!(!tile.matched);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_removed_id_goes_stale() {
        let mut arena = TileArena::new();
        let id = arena.insert(TileKind::Blue, Position::new(0, 0));
        assert!(arena.remove(id).is_some());
        assert!(arena.get(id).is_none());
        assert!(arena.remove(id).is_none());

        // Slot is reused with a new generation.
        let id2 = arena.insert(TileKind::Green, Position::new(0, 0));
        assert_eq!(id2.index(), id.index());
        assert_ne!(id2.generation(), id.generation());
        assert!(arena.get(id).is_none());
        assert_eq!(arena.get(id2).unwrap().kind, TileKind::Green);
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut arena = TileArena::new();
        let ids: Vec<_> = (0..4)
            .map(|i| arena.insert(TileKind::Yellow, Position::new(i, 0)))
            .collect();
        arena.clear();
        assert!(arena.is_empty());
        assert!(ids.iter().all(|id| !arena.contains(*id)));
    }
}
