use eframe::egui::{Pos2, Vec2, vec2};

use crate::normalization::{Normalization, target_distance};

use super::quadtree::QuadNode;
use super::{Force, SimulationNode};

const REPULSION_STRENGTH: f32 = -30.0;
const BARNES_HUT_THETA: f32 = 0.9;
const REPULSION_DISTANCE_MIN: f32 = 1.0;
const CENTERING_STRENGTH: f32 = 0.5;
const JIGGLE_LENGTH: f32 = 1e-3;

/// Deterministic nudge for pairs sitting exactly on top of each other.
/// Swapping the arguments flips the direction.
fn jiggle(first: usize, second: usize) -> Vec2 {
    let (low, high) = (first.min(second), first.max(second));
    let angle = ((low as f32) * 0.618_034 + (high as f32) * 0.414_214 + 0.37)
        * std::f32::consts::TAU;
    let direction = vec2(angle.cos(), angle.sin()) * JIGGLE_LENGTH;
    if first <= second { direction } else { -direction }
}

/// Many-body repulsion approximated with a Barnes-Hut quadtree.
#[derive(Clone, Debug)]
pub struct Repulsion {
    strength: f32,
    theta: f32,
    distance_min_sq: f32,
    positions: Vec<Pos2>,
}

impl Default for Repulsion {
    fn default() -> Self {
        Self {
            strength: REPULSION_STRENGTH,
            theta: BARNES_HUT_THETA,
            distance_min_sq: REPULSION_DISTANCE_MIN * REPULSION_DISTANCE_MIN,
            positions: Vec::new(),
        }
    }
}

impl Repulsion {
    /// Contribution of a mass sitting at `delta` from the node.
    fn contribution(&self, delta: Vec2, distance_sq: f32, mass: f32, alpha: f32) -> Vec2 {
        let distance_sq = if distance_sq < self.distance_min_sq {
            (self.distance_min_sq * distance_sq).sqrt()
        } else {
            distance_sq
        };
        delta * (self.strength * mass * alpha / distance_sq)
    }

    fn accumulate(&self, cell: &QuadNode, index: usize, alpha: f32, velocity: &mut Vec2) {
        if cell.mass <= 0.0 {
            return;
        }

        let point = self.positions[index];

        if cell.is_leaf() {
            for &other in &cell.indices {
                if other == index {
                    continue;
                }
                let mut delta = self.positions[other] - point;
                if delta.length_sq() <= f32::EPSILON {
                    delta = jiggle(index, other);
                }
                *velocity += self.contribution(delta, delta.length_sq(), 1.0, alpha);
            }
            return;
        }

        let delta = cell.center_of_mass - point;
        let distance_sq = delta.length_sq();
        let far_enough = !cell.bounds.contains(point)
            && cell.bounds.side_length() * cell.bounds.side_length()
                < self.theta * self.theta * distance_sq;

        if far_enough {
            *velocity += self.contribution(delta, distance_sq, cell.mass, alpha);
            return;
        }

        for child in cell.children.iter().flatten() {
            self.accumulate(child, index, alpha, velocity);
        }
    }
}

impl Force for Repulsion {
    fn apply(&mut self, nodes: &mut [SimulationNode], alpha: f32) {
        if nodes.len() < 2 {
            return;
        }

        self.positions.clear();
        self.positions.extend(nodes.iter().map(|node| node.position));
        let Some(tree) = QuadNode::build(&self.positions) else {
            return;
        };

        for (index, node) in nodes.iter_mut().enumerate() {
            self.accumulate(&tree, index, alpha, &mut node.velocity);
        }
    }
}

/// Pulls the centroid of all nodes toward a fixed point.
#[derive(Clone, Debug)]
pub struct Centering {
    center: Pos2,
    strength: f32,
}

impl Centering {
    pub fn new(center: Pos2) -> Self {
        Self {
            center,
            strength: CENTERING_STRENGTH,
        }
    }
}

impl Force for Centering {
    fn apply(&mut self, nodes: &mut [SimulationNode], _alpha: f32) {
        if nodes.is_empty() {
            return;
        }

        let mut sum = Vec2::ZERO;
        for node in nodes.iter() {
            sum += node.position.to_vec2();
        }
        let centroid = (sum / nodes.len() as f32).to_pos2();
        let correction = (centroid - self.center) * self.strength;
        for node in nodes.iter_mut() {
            node.velocity -= correction;
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Spring {
    source: usize,
    target: usize,
    distance: f32,
    strength: f32,
    bias: f32,
}

/// Spring force between linked nodes with a rest length derived from the
/// normalized link weight.
#[derive(Clone, Debug)]
pub struct LinkAttraction {
    endpoints: Vec<(usize, usize)>,
    distances: Vec<f32>,
    springs: Vec<Spring>,
}

impl LinkAttraction {
    /// `endpoints` and `weights` are index-aligned with the graph's links.
    pub fn new(
        endpoints: &[(usize, usize)],
        weights: &[f32],
        normalization: Normalization,
        scale: f32,
        shift: f32,
    ) -> Self {
        let distances = normalization
            .normalize(weights)
            .into_iter()
            .map(|normalized| target_distance(normalized, scale, shift))
            .collect();

        Self {
            endpoints: endpoints.to_vec(),
            distances,
            springs: Vec::new(),
        }
    }

    /// Rest length of every link, in link order.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }
}

impl Force for LinkAttraction {
    fn bind(&mut self, nodes: &[SimulationNode]) {
        let node_count = nodes.len();
        let usable = |(source, target): (usize, usize)| {
            source < node_count && target < node_count && source != target
        };

        let mut link_counts = vec![0usize; node_count];
        for &(source, target) in self.endpoints.iter().filter(|&&pair| usable(pair)) {
            link_counts[source] += 1;
            link_counts[target] += 1;
        }

        self.springs = self
            .endpoints
            .iter()
            .zip(&self.distances)
            .filter(|(pair, _)| usable(**pair))
            .map(|(&(source, target), &distance)| {
                let source_count = link_counts[source] as f32;
                let target_count = link_counts[target] as f32;
                Spring {
                    source,
                    target,
                    distance,
                    strength: 1.0 / source_count.min(target_count),
                    bias: source_count / (source_count + target_count),
                }
            })
            .collect();
    }

    fn apply(&mut self, nodes: &mut [SimulationNode], alpha: f32) {
        for spring in &self.springs {
            let (Some(source), Some(target)) = (nodes.get(spring.source), nodes.get(spring.target))
            else {
                continue;
            };

            let mut delta =
                (target.position + target.velocity) - (source.position + source.velocity);
            if delta.length_sq() <= f32::EPSILON {
                delta = jiggle(spring.source, spring.target);
            }
            let length = delta.length();
            let pull = delta * ((length - spring.distance) / length * alpha * spring.strength);

            nodes[spring.target].velocity -= pull * spring.bias;
            nodes[spring.source].velocity += pull * (1.0 - spring.bias);
        }
    }
}
