//! Perpetual 2-D force simulation.
//!
//! The engine performs no timing of its own: a per-frame driver calls
//! [`LayoutEngine::step`] once per display refresh, always with the same
//! alpha, so the layout keeps reacting to parameter changes instead of
//! settling.

mod forces;
mod quadtree;

use eframe::egui::{Pos2, Vec2, pos2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use forces::{Centering, LinkAttraction, Repulsion};

/// Force intensity passed to every step; it never decays.
pub const DEFAULT_ALPHA: f32 = 1.0;
/// Fraction of velocity lost after every step.
pub const VELOCITY_DECAY: f32 = 0.4;

pub const REPULSION_FORCE: &str = "repulsion";
pub const CENTERING_FORCE: &str = "centering";
pub const LINK_FORCE: &str = "links";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationNode {
    pub position: Pos2,
    pub velocity: Vec2,
}

pub trait Force {
    /// Called whenever the force is registered with an engine.
    fn bind(&mut self, _nodes: &[SimulationNode]) {}

    /// Adds this force's contribution to the node velocities.
    fn apply(&mut self, nodes: &mut [SimulationNode], alpha: f32);
}

struct NamedForce {
    name: String,
    force: Box<dyn Force>,
}

pub struct LayoutEngine {
    nodes: Vec<SimulationNode>,
    forces: Vec<NamedForce>,
    size: Vec2,
}

impl LayoutEngine {
    /// Places `node_count` nodes uniformly at random inside the canvas.
    pub fn new<R: Rng>(node_count: usize, width: f32, height: f32, rng: &mut R) -> Self {
        let nodes = (0..node_count)
            .map(|_| SimulationNode {
                position: pos2(rng.random::<f32>() * width, rng.random::<f32>() * height),
                velocity: Vec2::ZERO,
            })
            .collect();

        Self {
            nodes,
            forces: Vec::new(),
            size: vec2(width, height),
        }
    }

    pub fn with_seed(node_count: usize, width: f32, height: f32, seed: u64) -> Self {
        Self::new(node_count, width, height, &mut StdRng::seed_from_u64(seed))
    }

    /// Registers the repulsion and centering forces every layout uses.
    pub fn with_default_forces(mut self) -> Self {
        let center = self.center();
        self.add_force(REPULSION_FORCE, Repulsion::default());
        self.add_force(CENTERING_FORCE, Centering::new(center));
        self
    }

    pub fn nodes(&self) -> &[SimulationNode] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn position(&self, index: usize) -> Option<Pos2> {
        self.nodes.get(index).map(|node| node.position)
    }

    pub fn center(&self) -> Pos2 {
        (self.size * 0.5).to_pos2()
    }

    pub fn force_names(&self) -> impl Iterator<Item = &str> {
        self.forces.iter().map(|entry| entry.name.as_str())
    }

    /// Binds the force to the current nodes and registers it under `name`.
    /// An existing force with the same name is replaced in place.
    pub fn add_force(&mut self, name: &str, force: impl Force + 'static) {
        let mut force: Box<dyn Force> = Box::new(force);
        force.bind(&self.nodes);

        if let Some(entry) = self.forces.iter_mut().find(|entry| entry.name == name) {
            entry.force = force;
        } else {
            self.forces.push(NamedForce {
                name: name.to_owned(),
                force,
            });
        }
    }

    pub fn remove_force(&mut self, name: &str) -> Option<Box<dyn Force>> {
        let index = self.forces.iter().position(|entry| entry.name == name)?;
        Some(self.forces.remove(index).force)
    }

    /// Drops the force registered under `name` and appends the new one.
    /// Node positions and velocities are left untouched.
    pub fn replace_force(&mut self, name: &str, force: impl Force + 'static) {
        self.remove_force(name);
        self.add_force(name, force);
    }

    pub fn step(&mut self, alpha: f32) {
        for entry in &mut self.forces {
            entry.force.apply(&mut self.nodes, alpha);
        }

        let retained = 1.0 - VELOCITY_DECAY;
        for node in &mut self.nodes {
            node.position += node.velocity;
            node.velocity *= retained;
        }
    }
}
