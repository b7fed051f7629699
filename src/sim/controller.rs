//! Rule engine controller
//!
//! Owns one game's state, its config and the next-piece RNG, and applies the
//! three rules: drop on pointer press, merge on equal-size collision and
//! game over on overflow. Everything arrives through `dispatch`; physics is
//! reached only through the `PhysicsWorld` passed in.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::message::{GameEvent, GameMessage};
use super::state::{BodyHandle, GamePhase, GameState, Piece};
use super::tick::{filled_height, overflowed};
use super::tier::TierSet;
use super::world::{BodyDesc, PhysicsWorld};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::palette;

/// One game instance
#[derive(Debug, Clone)]
pub struct Controller {
    config: GameConfig,
    tiers: TierSet,
    rng: Pcg32,
    state: GameState,
    /// Pending UI events (drained by the front end)
    events: Vec<GameEvent>,
}

impl Controller {
    /// Create a game; publishes the initial score and next piece
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let tiers = config.tiers();
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let next_size = tiers.draw(&mut rng);

        let mut controller = Self {
            config,
            tiers,
            rng,
            state: GameState::new(next_size),
            events: Vec::new(),
        };
        controller.emit(GameEvent::ScoreChanged { score: 0 });
        controller.emit(GameEvent::NextSize { size: next_size });
        log::info!(
            "Game created (seed {}, tiers {}..={})",
            controller.config.seed,
            controller.tiers.min(),
            controller.tiers.max()
        );
        Ok(controller)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tiers(&self) -> &TierSet {
        &self.tiers
    }

    /// Take all pending UI events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// JSON snapshot of the rule-engine state
    pub fn snapshot_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Route a message to its handler
    pub fn dispatch<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        message: GameMessage,
    ) -> Result<(), GameError> {
        match message {
            GameMessage::PointerDown { x } => self.on_pointer_down(world, x),
            GameMessage::Collision { a, b } => self.on_collision(world, a, b).map(|_| ()),
            GameMessage::Tick => {
                self.on_tick(world);
                Ok(())
            }
            GameMessage::Restart => {
                self.restart(world);
                Ok(())
            }
        }
    }

    /// Step the world once, deliver that step's collisions, then tick
    pub fn run_frame<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        dt: f32,
    ) -> Result<(), GameError> {
        for (a, b) in world.step(dt) {
            self.dispatch(world, GameMessage::Collision { a, b })?;
        }
        self.dispatch(world, GameMessage::Tick)
    }

    /// Create a piece of `size` at `pos`
    pub fn spawn<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        size: u32,
        pos: Vec2,
    ) -> Result<BodyHandle, GameError> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let size = self.tiers.check(size)?;

        let handle = world.create_body(BodyDesc {
            pos,
            radius: size as f32 / 2.0,
            size,
            color: palette::color_for_size(size),
            gravity: self.config.gravity,
            bounce: self.config.bounce,
            collide_world_bounds: true,
        });
        self.state.track(Piece::new(handle, size));
        self.emit(GameEvent::Spawned { handle, size, pos });
        log::debug!("Spawned {:?} size {} at ({:.1}, {:.1})", handle, size, pos.x, pos.y);
        Ok(handle)
    }

    /// Stop tracking a piece and free its body
    fn destroy<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W, handle: BodyHandle) {
        if self.state.untrack(handle).is_some() {
            world.destroy_body(handle);
        }
    }

    /// Drop the previewed piece at `x`, then draw a new preview
    pub fn on_pointer_down<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        x: f32,
    ) -> Result<(), GameError> {
        if self.state.is_over() {
            log::debug!("Ignoring drop at x={:.1}: game over", x);
            return Ok(());
        }

        let pos = Vec2::new(x, self.config.drop_y());
        self.spawn(world, self.state.next_size, pos)?;
        self.state.drops += 1;

        self.state.next_size = self.tiers.draw(&mut self.rng);
        self.emit(GameEvent::NextSize {
            size: self.state.next_size,
        });
        Ok(())
    }

    /// Merge two equal pieces into the next tier; returns whether a merge happened
    pub fn on_collision<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Result<bool, GameError> {
        if a == b || self.state.is_over() {
            return Ok(false);
        }
        // Either side may already have merged earlier in this frame
        let (Some(piece_a), Some(piece_b)) =
            (self.state.active_piece(a), self.state.active_piece(b))
        else {
            log::debug!("Collision {:?}/{:?} with inactive piece", a, b);
            return Ok(false);
        };
        if piece_a.size != piece_b.size {
            return Ok(false);
        }
        let from = piece_a.size;
        let Some(size) = self.tiers.next_up(from) else {
            return Ok(false);
        };

        let (Some(pos_a), Some(pos_b)) = (world.body_position(a), world.body_position(b)) else {
            debug_assert!(false, "tracked pieces {:?}/{:?} have no body", a, b);
            log::warn!("Collision {:?}/{:?} between untracked bodies", a, b);
            return Ok(false);
        };
        let midpoint = (pos_a + pos_b) * 0.5;

        self.destroy(world, a);
        self.destroy(world, b);
        let into = self.spawn(world, size, midpoint)?;

        self.state.score += u64::from(size);
        self.state.merges += 1;
        self.emit(GameEvent::Merged { from, into, size });
        self.emit(GameEvent::ScoreChanged {
            score: self.state.score,
        });
        log::info!("Merged two {} into {} (score {})", from, size, self.state.score);
        Ok(true)
    }

    /// End-of-frame overflow check; returns true on the frame the game ends
    pub fn on_tick<W: PhysicsWorld + ?Sized>(&mut self, world: &W) -> bool {
        if self.state.is_over() {
            return false;
        }
        let filled = filled_height(&self.state, world, self.config.starting_line_y);
        if !overflowed(filled, self.config.container_height()) {
            return false;
        }

        self.state.phase = GamePhase::GameOver;
        self.emit(GameEvent::GameOver {
            score: self.state.score,
        });
        log::info!(
            "Game over: score {}, {} drops, {} merges",
            self.state.score,
            self.state.drops,
            self.state.merges
        );
        true
    }

    /// Clear the board and reset score; the next-piece preview carries over
    pub fn restart<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        let cleared = self.state.untrack_all();
        for piece in &cleared {
            world.destroy_body(piece.handle);
        }

        self.state.score = 0;
        self.state.drops = 0;
        self.state.merges = 0;
        self.state.phase = GamePhase::Playing;

        self.emit(GameEvent::Restarted);
        self.emit(GameEvent::ScoreChanged { score: 0 });
        log::info!("Game restarted ({} pieces cleared)", cleared.len());
    }
}
