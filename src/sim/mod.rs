//! Deterministic simulation module
//!
//! All gameplay rules live here. The rule engine must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by body handle)
//! - Physics reached only through the `PhysicsWorld` trait
//! - No rendering or platform dependencies

pub mod controller;
pub mod message;
pub mod state;
pub mod tick;
pub mod tier;
pub mod world;

pub use controller::Controller;
pub use message::{GameEvent, GameMessage};
pub use state::{BodyHandle, GamePhase, GameState, Piece};
pub use tick::{filled_height, overflowed};
pub use tier::TierSet;
pub use world::{ArcadeWorld, Body, BodyDesc, PhysicsWorld};
