//! Physics world seam and a headless arcade implementation
//!
//! The rule engine only talks to physics through `PhysicsWorld`. `ArcadeWorld`
//! is a small stand-in used by the front ends and tests: gravity, wall bounce,
//! circle overlap reporting and positional separation. Nothing more.

use glam::Vec2;

use super::state::BodyHandle;
use crate::config::GameConfig;

/// Everything the world needs to create a circular body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub pos: Vec2,
    pub radius: f32,
    /// Piece size tag
    pub size: u32,
    /// Fill colour (0xRRGGBB)
    pub color: u32,
    pub gravity: f32,
    pub bounce: f32,
    pub collide_world_bounds: bool,
}

/// Capability surface the rule engine consumes from a physics engine
pub trait PhysicsWorld {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle;

    fn destroy_body(&mut self, handle: BodyHandle);

    /// Current centre of a body (None if unknown)
    fn body_position(&self, handle: BodyHandle) -> Option<Vec2>;

    /// Advance one step and return the pairs that overlapped during it.
    ///
    /// Each pair is reported once per step, lower handle first, in handle order.
    fn step(&mut self, dt: f32) -> Vec<(BodyHandle, BodyHandle)>;
}

/// A simulated circle
#[derive(Debug, Clone)]
pub struct Body {
    pub handle: BodyHandle,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub size: u32,
    pub color: u32,
    pub gravity: f32,
    pub bounce: f32,
    pub collide_world_bounds: bool,
}

impl Body {
    /// Clamp inside `[0, width] x [0, height]`, reflecting velocity with bounce
    fn clamp_to_bounds(&mut self, width: f32, height: f32) {
        if !self.collide_world_bounds {
            return;
        }
        let r = self.radius;

        if self.pos.y + r > height {
            self.pos.y = height - r;
            if self.vel.y > 0.0 {
                self.vel.y = -self.vel.y * self.bounce;
            }
        } else if self.pos.y - r < 0.0 {
            self.pos.y = r;
            if self.vel.y < 0.0 {
                self.vel.y = -self.vel.y * self.bounce;
            }
        }

        if self.pos.x + r > width {
            self.pos.x = width - r;
            if self.vel.x > 0.0 {
                self.vel.x = -self.vel.x * self.bounce;
            }
        } else if self.pos.x - r < 0.0 {
            self.pos.x = r;
            if self.vel.x < 0.0 {
                self.vel.x = -self.vel.x * self.bounce;
            }
        }
    }
}

/// Headless arcade physics for circles in a box
#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    width: f32,
    height: f32,
    /// Bodies sorted by handle
    bodies: Vec<Body>,
    next_handle: u32,
}

impl ArcadeWorld {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            bodies: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.index_of(handle).map(|i| &self.bodies[i])
    }

    /// Teleport a body (tests and scripted scenes)
    pub fn set_position(&mut self, handle: BodyHandle, pos: Vec2) {
        if let Some(i) = self.index_of(handle) {
            self.bodies[i].pos = pos;
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    fn index_of(&self, handle: BodyHandle) -> Option<usize> {
        self.bodies.binary_search_by_key(&handle, |b| b.handle).ok()
    }

    fn integrate(&mut self, dt: f32) {
        for body in &mut self.bodies {
            body.vel.y += body.gravity * dt;
            body.pos += body.vel * dt;
            body.clamp_to_bounds(self.width, self.height);
        }
    }

    /// Index pairs whose circles overlap, in handle order
    fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let a = &self.bodies[i];
                let b = &self.bodies[j];
                let reach = a.radius + b.radius;
                if a.pos.distance_squared(b.pos) < reach * reach {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Push two overlapping bodies apart and damp their approach speed
    fn separate(&mut self, i: usize, j: usize) {
        let (a, b) = (&self.bodies[i], &self.bodies[j]);
        let delta = b.pos - a.pos;
        let dist = delta.length();
        let overlap = a.radius + b.radius - dist;
        if overlap <= 0.0 {
            return;
        }
        // Coincident centres: stack the later body on top
        let normal = if dist > f32::EPSILON {
            delta / dist
        } else {
            Vec2::NEG_Y
        };
        let bounce = a.bounce.min(b.bounce);
        let approach = (b.vel - a.vel).dot(normal);

        let correction = normal * (overlap / 2.0);
        self.bodies[i].pos -= correction;
        self.bodies[j].pos += correction;

        if approach < 0.0 {
            let impulse = normal * (-(1.0 + bounce) * approach / 2.0);
            self.bodies[i].vel -= impulse;
            self.bodies[j].vel += impulse;
        }
    }
}

impl PhysicsWorld for ArcadeWorld {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        // New bodies drop straight down
        self.bodies.push(Body {
            handle,
            pos: desc.pos,
            vel: Vec2::ZERO,
            radius: desc.radius,
            size: desc.size,
            color: desc.color,
            gravity: desc.gravity,
            bounce: desc.bounce,
            collide_world_bounds: desc.collide_world_bounds,
        });
        handle
    }

    fn destroy_body(&mut self, handle: BodyHandle) {
        if let Some(i) = self.index_of(handle) {
            self.bodies.remove(i);
        }
    }

    fn body_position(&self, handle: BodyHandle) -> Option<Vec2> {
        self.body(handle).map(|b| b.pos)
    }

    fn step(&mut self, dt: f32) -> Vec<(BodyHandle, BodyHandle)> {
        self.integrate(dt);

        let pairs = self.overlapping_pairs();
        for &(i, j) in &pairs {
            self.separate(i, j);
        }
        let (width, height) = (self.width, self.height);
        for body in &mut self.bodies {
            body.clamp_to_bounds(width, height);
        }

        pairs
            .into_iter()
            .map(|(i, j)| (self.bodies[i].handle, self.bodies[j].handle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(pos: Vec2, size: u32) -> BodyDesc {
        BodyDesc {
            pos,
            radius: size as f32 / 2.0,
            size,
            color: 0,
            gravity: 400.0,
            bounce: 0.3,
            collide_world_bounds: true,
        }
    }

    #[test]
    fn test_handles_are_unique() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        let a = world.create_body(desc(Vec2::new(50.0, 50.0), 20));
        let b = world.create_body(desc(Vec2::new(150.0, 50.0), 20));
        world.destroy_body(a);
        let c = world.create_body(desc(Vec2::new(250.0, 50.0), 20));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(world.body_position(a).is_none());
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        let h = world.create_body(desc(Vec2::new(100.0, 150.0), 20));
        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }
        let pos = world.body_position(h).unwrap();
        assert!(pos.y > 150.0);
        assert_eq!(pos.x, 100.0);
    }

    #[test]
    fn test_rests_on_floor() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        let h = world.create_body(desc(Vec2::new(100.0, 150.0), 40));
        for _ in 0..600 {
            world.step(1.0 / 60.0);
        }
        let pos = world.body_position(h).unwrap();
        assert!((pos.y + 20.0 - 640.0).abs() < 0.5);
    }

    #[test]
    fn test_side_walls_clamp() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        let h = world.create_body(desc(Vec2::new(-30.0, 150.0), 20));
        world.step(1.0 / 60.0);
        assert_eq!(world.body_position(h).unwrap().x, 10.0);
    }

    #[test]
    fn test_reports_and_separates_overlap() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        let a = world.create_body(desc(Vec2::new(100.0, 300.0), 20));
        let b = world.create_body(desc(Vec2::new(105.0, 300.0), 20));

        let pairs = world.step(1.0 / 60.0);
        assert_eq!(pairs, vec![(a, b)]);

        let pa = world.body_position(a).unwrap();
        let pb = world.body_position(b).unwrap();
        assert!(pa.distance(pb) >= 20.0 - 1e-3);
    }

    #[test]
    fn test_no_pair_when_apart() {
        let mut world = ArcadeWorld::new(360.0, 640.0);
        world.create_body(desc(Vec2::new(50.0, 300.0), 20));
        world.create_body(desc(Vec2::new(200.0, 300.0), 20));
        assert!(world.step(1.0 / 60.0).is_empty());
    }
}
