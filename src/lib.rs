//! Circle Merge - a drop-and-merge stacking game
//!
//! Core modules:
//! - `sim`: Deterministic rule engine (spawn, merge, overflow) and a headless arcade world
//! - `config`: Data-driven board geometry and tuning
//! - `palette`: Piece colours
//! - `hud`: Score / next-piece / game-over text

pub mod config;
pub mod error;
pub mod hud;
pub mod palette;
pub mod sim;

pub use config::GameConfig;
pub use error::GameError;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz arcade physics)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Board dimensions (screen space, y grows downward)
    pub const WORLD_WIDTH: f32 = 360.0;
    pub const WORLD_HEIGHT: f32 = 640.0;
    /// Y position of the starting line
    pub const STARTING_LINE_Y: f32 = 100.0;
    /// Height of the container below the starting line
    pub const CONTAINER_HEIGHT: f32 = WORLD_HEIGHT - STARTING_LINE_Y;
    /// Pieces are dropped this far below the starting line
    pub const DROP_OFFSET: f32 = 50.0;

    /// Downward acceleration applied to every piece (pixels/s²)
    pub const GRAVITY: f32 = 400.0;
    /// Restitution against walls and other pieces
    pub const BOUNCE: f32 = 0.3;

    /// Size tiers: 20, 30, ..., 160
    pub const TIER_MIN: u32 = 20;
    pub const TIER_STEP: u32 = 10;
    pub const TIER_COUNT: u32 = 15;

    pub const BACKGROUND_COLOR: u32 = 0xf3f3f3;
    pub const STARTING_LINE_COLOR: u32 = 0xff0000;
    pub const TEXT_COLOR: u32 = 0x000000;
}
