//! Messages into the rule engine and events out of it

use glam::Vec2;

use super::state::BodyHandle;

/// Input delivered to `Controller::dispatch`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameMessage {
    /// Primary pointer press at world x
    PointerDown { x: f32 },
    /// Two tracked bodies overlap
    Collision { a: BodyHandle, b: BodyHandle },
    /// End of a simulation frame (after all collisions of that frame)
    Tick,
    /// Explicit restart from the UI
    Restart,
}

/// Output for the UI sinks, drained by the front end
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Score changed (also published on start and restart)
    ScoreChanged { score: u64 },
    /// Next-piece preview changed
    NextSize { size: u32 },
    /// A piece entered the world
    Spawned {
        handle: BodyHandle,
        size: u32,
        pos: Vec2,
    },
    /// Two pieces of `from` combined into `into`
    Merged {
        from: u32,
        into: BodyHandle,
        size: u32,
    },
    /// Stack reached the starting line; fired once per game
    GameOver { score: u64 },
    /// Board cleared by restart
    Restarted,
}
