//! Force Simulation for the network view
//!
//! A d3-style velocity-Verlet layout that runs one tick per frame while it is
//! "hot". Designed for the dashboard's scale (tens to a few hundred nodes), so
//! pairwise forces are computed exactly instead of with a quadtree.
//!
//! Forces, applied in order each tick:
//! - Link springs (target distance per link, strength `1 / min(degree)`)
//! - Many-body charge (negative = repulsion)
//! - Centering (shifts the mean position onto the viewport center)
//! - Collision (keeps bodies `radius` apart)
//!
//! # Usage
//! ```ignore
//! let mut sim = ForceSimulation::new(ForceConfig::default(), -300.0, center, body_count, springs);
//! sim.seed_positions(&mut bodies);
//!
//! // Each frame:
//! if sim.is_active() {
//!     sim.tick(&mut bodies);
//! }
//! ```

use egui::{Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

// =============================================================================
// BODY / SPRING
// =============================================================================

/// A simulated point. Owned by the scene, mutated only by the layout engine
/// and by drag pinning.
#[derive(Debug, Clone)]
pub struct Body {
    /// Current position (scene coordinates)
    pub position: Pos2,
    /// Current velocity
    pub velocity: Vec2,
    /// Pinned position while dragged
    pub fixed: Option<Pos2>,
    /// Collision radius
    pub radius: f32,
}

impl Body {
    pub fn new(radius: f32) -> Self {
        Self {
            position: Pos2::ZERO,
            velocity: Vec2::ZERO,
            fixed: None,
            radius,
        }
    }

    /// Builder: set position
    pub fn with_position(mut self, pos: Pos2) -> Self {
        self.position = pos;
        self
    }
}

/// A link between two bodies with a target length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub source: usize,
    pub target: usize,
    pub distance: f32,
}

// =============================================================================
// LAYOUT ENGINE
// =============================================================================

/// Narrow interface between the renderer and whatever lays the graph out.
///
/// The renderer owns the bodies; the engine only advances them.
pub trait LayoutEngine {
    /// Advance one step
    fn tick(&mut self, bodies: &mut [Body]);

    /// Current "temperature"
    fn alpha(&self) -> f32;

    /// Reheat (1.0 = full restart)
    fn set_alpha(&mut self, alpha: f32);

    fn alpha_target(&self) -> f32;

    /// Temperature the simulation cools towards
    fn set_alpha_target(&mut self, target: f32);

    /// Whether further ticks still move things
    fn is_active(&self) -> bool;
}

// =============================================================================
// SIMULATION CONFIG
// =============================================================================

/// Tuning for the force simulation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Below this alpha the simulation idles
    pub alpha_min: f32,

    /// Per-tick approach of alpha to its target
    pub alpha_decay: f32,

    /// Fraction of velocity lost per tick
    pub velocity_decay: f32,

    /// Added to node size to get the collision radius
    pub collide_margin: f32,

    /// Alpha target while a node is dragged
    pub drag_alpha_target: f32,

    /// Charge is not evaluated closer than this
    pub distance_min: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            alpha_min,
            // reaches alpha_min after 300 ticks
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            collide_margin: 5.0,
            drag_alpha_target: 0.3,
            distance_min: 1.0,
        }
    }
}

// =============================================================================
// FORCE SIMULATION
// =============================================================================

/// Force-directed layout simulation
#[derive(Debug, Clone)]
pub struct ForceSimulation {
    /// Simulation configuration
    pub config: ForceConfig,

    /// Many-body strength
    repulsion: f32,

    /// Centering target
    center: Pos2,

    springs: Vec<Spring>,

    /// Per-spring strength, `1 / min(degree(source), degree(target))`
    spring_strength: Vec<f32>,

    /// Share of the correction applied to the target end
    spring_bias: Vec<f32>,

    alpha: f32,
    alpha_target: f32,

    rng: StdRng,
}

impl ForceSimulation {
    /// Create a simulation for `body_count` bodies.
    ///
    /// Springs referencing bodies outside `0..body_count` are dropped.
    pub fn new(
        config: ForceConfig,
        repulsion: f32,
        center: Pos2,
        body_count: usize,
        springs: Vec<Spring>,
    ) -> Self {
        Self::with_rng(
            config,
            repulsion,
            center,
            body_count,
            springs,
            StdRng::from_entropy(),
        )
    }

    /// Same as `new` with a deterministic random source
    pub fn with_seed(
        config: ForceConfig,
        repulsion: f32,
        center: Pos2,
        body_count: usize,
        springs: Vec<Spring>,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            config,
            repulsion,
            center,
            body_count,
            springs,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        config: ForceConfig,
        repulsion: f32,
        center: Pos2,
        body_count: usize,
        springs: Vec<Spring>,
        rng: StdRng,
    ) -> Self {
        let springs: Vec<Spring> = springs
            .into_iter()
            .filter(|s| s.source < body_count && s.target < body_count)
            .collect();

        let mut degree = vec![0usize; body_count];
        for spring in &springs {
            degree[spring.source] += 1;
            degree[spring.target] += 1;
        }

        let spring_strength = springs
            .iter()
            .map(|s| 1.0 / degree[s.source].min(degree[s.target]).max(1) as f32)
            .collect();
        let spring_bias = springs
            .iter()
            .map(|s| {
                let src = degree[s.source] as f32;
                let tgt = degree[s.target] as f32;
                src / (src + tgt)
            })
            .collect();

        Self {
            config,
            repulsion,
            center,
            springs,
            spring_strength,
            spring_bias,
            alpha: 1.0,
            alpha_target: 0.0,
            rng,
        }
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    /// Place bodies on a phyllotaxis spiral around the center, rotated by a
    /// random angle. Pinned bodies are left alone.
    pub fn seed_positions(&mut self, bodies: &mut [Body]) {
        let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());
        let rotation = self.rng.gen_range(0.0..std::f32::consts::TAU);
        for (i, body) in bodies.iter_mut().enumerate() {
            if body.fixed.is_some() {
                continue;
            }
            let radius = 10.0 * (0.5 + i as f32).sqrt();
            let angle = rotation + i as f32 * golden_angle;
            body.position = self.center + Vec2::angled(angle) * radius;
            body.velocity = Vec2::ZERO;
        }
    }

    /// Tiny random offset used to separate coincident bodies
    fn jiggle(&mut self) -> f32 {
        (self.rng.gen::<f32>() - 0.5) * 1e-6
    }

    fn apply_springs(&mut self, bodies: &mut [Body]) {
        for i in 0..self.springs.len() {
            let Spring {
                source,
                target,
                distance,
            } = self.springs[i];
            if source == target {
                continue;
            }

            let mut delta = (bodies[target].position + bodies[target].velocity)
                - (bodies[source].position + bodies[source].velocity);
            if delta.x == 0.0 {
                delta.x = self.jiggle();
            }
            if delta.y == 0.0 {
                delta.y = self.jiggle();
            }

            let length = delta.length();
            let k = (length - distance) / length * self.alpha * self.spring_strength[i];
            let correction = delta * k;
            let bias = self.spring_bias[i];

            bodies[target].velocity -= correction * bias;
            bodies[source].velocity += correction * (1.0 - bias);
        }
    }

    fn apply_charge(&mut self, bodies: &mut [Body]) {
        if self.repulsion == 0.0 {
            return;
        }
        let n = bodies.len();
        let min_sq = self.config.distance_min * self.config.distance_min;

        for i in 0..n {
            let mut push = Vec2::ZERO;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let mut delta = bodies[j].position - bodies[i].position;
                if delta.x == 0.0 {
                    delta.x = self.jiggle();
                }
                if delta.y == 0.0 {
                    delta.y = self.jiggle();
                }
                let mut dist_sq = delta.length_sq();
                if dist_sq < min_sq {
                    dist_sq = (min_sq * dist_sq).sqrt();
                }
                push += delta * (self.repulsion * self.alpha / dist_sq);
            }
            bodies[i].velocity += push;
        }
    }

    fn apply_center(&self, bodies: &mut [Body]) {
        if bodies.is_empty() {
            return;
        }
        let sum = bodies
            .iter()
            .fold(Vec2::ZERO, |acc, b| acc + b.position.to_vec2());
        let mean = sum / bodies.len() as f32;
        let shift = mean - self.center.to_vec2();
        for body in bodies.iter_mut() {
            body.position -= shift;
        }
    }

    fn apply_collision(&mut self, bodies: &mut [Body]) {
        let n = bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let ri = bodies[i].radius;
                let rj = bodies[j].radius;
                let reach = ri + rj;

                let mut delta = (bodies[i].position + bodies[i].velocity)
                    - (bodies[j].position + bodies[j].velocity);
                if delta.length_sq() >= reach * reach {
                    continue;
                }
                if delta.x == 0.0 {
                    delta.x = self.jiggle();
                }
                if delta.y == 0.0 {
                    delta.y = self.jiggle();
                }

                let length = delta.length();
                let push = delta * ((reach - length) / length);
                let ri_sq = ri * ri;
                let rj_sq = rj * rj;
                let share = rj_sq / (ri_sq + rj_sq);

                bodies[i].velocity += push * share;
                bodies[j].velocity -= push * (1.0 - share);
            }
        }
    }
}

impl LayoutEngine for ForceSimulation {
    fn tick(&mut self, bodies: &mut [Body]) {
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        if bodies.is_empty() {
            return;
        }

        self.apply_springs(bodies);
        self.apply_charge(bodies);
        self.apply_center(bodies);
        self.apply_collision(bodies);

        let keep = 1.0 - self.config.velocity_decay;
        for body in bodies.iter_mut() {
            match body.fixed {
                Some(pin) => {
                    body.position = pin;
                    body.velocity = Vec2::ZERO;
                }
                None => {
                    body.velocity *= keep;
                    body.position += body.velocity;
                }
            }
        }
    }

    fn alpha(&self) -> f32 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    fn set_alpha_target(&mut self, target: f32) {
        self.alpha_target = target.clamp(0.0, 1.0);
    }

    fn is_active(&self) -> bool {
        self.alpha >= self.config.alpha_min || self.alpha_target >= self.config.alpha_min
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(repulsion: f32, body_count: usize, springs: Vec<Spring>) -> ForceSimulation {
        ForceSimulation::with_seed(
            ForceConfig::default(),
            repulsion,
            Pos2::new(400.0, 300.0),
            body_count,
            springs,
            7,
        )
    }

    #[test]
    fn test_charge_pushes_bodies_apart() {
        let mut bodies = vec![
            Body::new(0.0).with_position(Pos2::new(395.0, 300.0)),
            Body::new(0.0).with_position(Pos2::new(405.0, 300.0)),
        ];
        let mut sim = sim(-300.0, 2, Vec::new());

        for _ in 0..100 {
            sim.tick(&mut bodies);
        }

        let dist = (bodies[0].position - bodies[1].position).length();
        assert!(dist > 10.0);
    }

    #[test]
    fn test_spring_pulls_towards_distance() {
        let mut bodies = vec![
            Body::new(0.0).with_position(Pos2::new(100.0, 300.0)),
            Body::new(0.0).with_position(Pos2::new(700.0, 300.0)),
        ];
        let springs = vec![Spring {
            source: 0,
            target: 1,
            distance: 50.0,
        }];
        let mut sim = sim(0.0, 2, springs);

        for _ in 0..300 {
            sim.tick(&mut bodies);
        }

        let dist = (bodies[0].position - bodies[1].position).length();
        assert!((dist - 50.0).abs() < 20.0, "dist = {dist}");
    }

    #[test]
    fn test_center_force_keeps_mean_on_center() {
        let mut bodies = vec![
            Body::new(0.0).with_position(Pos2::new(0.0, 0.0)),
            Body::new(0.0).with_position(Pos2::new(20.0, 40.0)),
        ];
        let mut sim = sim(0.0, 2, Vec::new());
        sim.tick(&mut bodies);

        let mean = (bodies[0].position.to_vec2() + bodies[1].position.to_vec2()) / 2.0;
        assert!((mean.x - 400.0).abs() < 0.01);
        assert!((mean.y - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_collision_separates_overlapping_bodies() {
        let mut bodies = vec![
            Body::new(20.0).with_position(Pos2::new(398.0, 300.0)),
            Body::new(20.0).with_position(Pos2::new(402.0, 300.0)),
        ];
        let mut sim = sim(0.0, 2, Vec::new());
        for _ in 0..50 {
            sim.tick(&mut bodies);
        }
        let dist = (bodies[0].position - bodies[1].position).length();
        assert!(dist > 30.0, "dist = {dist}");
    }

    #[test]
    fn test_pinned_body_stays_put() {
        let pin = Pos2::new(10.0, 10.0);
        let mut pinned = Body::new(5.0).with_position(pin);
        pinned.fixed = Some(pin);
        let mut bodies = vec![pinned, Body::new(5.0).with_position(Pos2::new(12.0, 10.0))];
        let mut sim = sim(-300.0, 2, Vec::new());

        for _ in 0..20 {
            sim.tick(&mut bodies);
        }

        assert_eq!(bodies[0].position, pin);
        assert_eq!(bodies[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_cools_down_and_reheats() {
        let mut bodies = vec![Body::new(5.0)];
        let mut sim = sim(-300.0, 1, Vec::new());
        assert!(sim.is_active());

        for _ in 0..400 {
            sim.tick(&mut bodies);
        }
        assert!(!sim.is_active());

        sim.set_alpha_target(0.3);
        assert!(sim.is_active());
        sim.tick(&mut bodies);
        assert!(sim.alpha() > sim.config.alpha_min);

        sim.set_alpha_target(0.0);
        sim.set_alpha(1.0);
        assert_eq!(sim.alpha(), 1.0);
    }

    #[test]
    fn test_out_of_range_springs_dropped() {
        let springs = vec![
            Spring {
                source: 0,
                target: 1,
                distance: 50.0,
            },
            Spring {
                source: 0,
                target: 9,
                distance: 50.0,
            },
        ];
        let sim = sim(-300.0, 2, springs);
        assert_eq!(sim.springs().len(), 1);
    }

    #[test]
    fn test_seed_positions_spread_around_center() {
        let mut bodies = vec![Body::new(5.0); 10];
        let mut sim = sim(-300.0, 10, Vec::new());
        sim.seed_positions(&mut bodies);

        for body in &bodies {
            let r = (body.position - sim.center()).length();
            assert!(r > 0.0 && r < 40.0);
        }
        assert_ne!(bodies[0].position, bodies[1].position);
    }
}
