//! Game state and core simulation types
//!
//! Positions are owned by the physics world; the state here only records
//! which bodies are pieces, their sizes and the score/next/phase bookkeeping.

use serde::{Deserialize, Serialize};

/// Opaque identity of a body inside the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting drops
    #[default]
    Playing,
    /// Stack reached the starting line; latched until restart
    GameOver,
}

/// A live circle tracked by the rule engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub handle: BodyHandle,
    /// Diameter in pixels; fixed for the piece's lifetime
    pub size: u32,
    /// Cleared once the piece is merged or destroyed
    pub active: bool,
}

impl Piece {
    pub fn new(handle: BodyHandle, size: u32) -> Self {
        Self {
            handle,
            size,
            active: true,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0
    }
}

/// Complete rule-engine state (serializable for snapshots)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Score
    pub score: u64,
    /// Size of the next dropped piece
    pub next_size: u32,
    /// Live pieces (sorted by handle for determinism)
    pub pieces: Vec<Piece>,
    /// Current phase
    pub phase: GamePhase,
    /// Pieces dropped this game
    pub drops: u32,
    /// Merges this game
    pub merges: u32,
}

impl GameState {
    pub fn new(next_size: u32) -> Self {
        Self {
            score: 0,
            next_size,
            pieces: Vec::new(),
            phase: GamePhase::Playing,
            drops: 0,
            merges: 0,
        }
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn piece(&self, handle: BodyHandle) -> Option<&Piece> {
        self.pieces
            .binary_search_by_key(&handle, |p| p.handle)
            .ok()
            .map(|i| &self.pieces[i])
    }

    /// Piece for `handle` if it is still tracked and active
    pub fn active_piece(&self, handle: BodyHandle) -> Option<&Piece> {
        self.piece(handle).filter(|p| p.active)
    }

    pub fn active_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.active)
    }

    /// Start tracking a piece, keeping handle order
    pub fn track(&mut self, piece: Piece) {
        match self
            .pieces
            .binary_search_by_key(&piece.handle, |p| p.handle)
        {
            Ok(i) => {
                debug_assert!(false, "body {:?} tracked twice", piece.handle);
                self.pieces[i] = piece;
            }
            Err(i) => self.pieces.insert(i, piece),
        }
    }

    /// Deactivate and stop tracking a piece, returning it
    pub fn untrack(&mut self, handle: BodyHandle) -> Option<Piece> {
        let i = self
            .pieces
            .binary_search_by_key(&handle, |p| p.handle)
            .ok()?;
        let mut piece = self.pieces.remove(i);
        piece.active = false;
        Some(piece)
    }

    /// Deactivate and stop tracking every piece
    pub fn untrack_all(&mut self) -> Vec<Piece> {
        let mut pieces = std::mem::take(&mut self.pieces);
        for piece in &mut pieces {
            piece.active = false;
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_keeps_order() {
        let mut state = GameState::new(20);
        state.track(Piece::new(BodyHandle(5), 20));
        state.track(Piece::new(BodyHandle(2), 30));
        state.track(Piece::new(BodyHandle(9), 40));

        let handles: Vec<_> = state.pieces.iter().map(|p| p.handle.0).collect();
        assert_eq!(handles, vec![2, 5, 9]);
        assert_eq!(state.piece(BodyHandle(5)).map(|p| p.size), Some(20));
    }

    #[test]
    fn test_untrack_deactivates() {
        let mut state = GameState::new(20);
        state.track(Piece::new(BodyHandle(1), 20));

        let removed = state.untrack(BodyHandle(1)).unwrap();
        assert!(!removed.active);
        assert!(state.active_piece(BodyHandle(1)).is_none());
        assert!(state.untrack(BodyHandle(1)).is_none());
    }

    #[test]
    fn test_untrack_all() {
        let mut state = GameState::new(20);
        state.track(Piece::new(BodyHandle(1), 20));
        state.track(Piece::new(BodyHandle(2), 20));

        let cleared = state.untrack_all();
        assert_eq!(cleared.len(), 2);
        assert!(cleared.iter().all(|p| !p.active));
        assert_eq!(state.active_pieces().count(), 0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut state = GameState::new(30);
        state.track(Piece::new(BodyHandle(1), 20));
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.next_size, 30);
        assert_eq!(back.pieces, state.pieces);
        assert_eq!(back.phase, GamePhase::Playing);
    }
}
