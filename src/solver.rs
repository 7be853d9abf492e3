//! The multi-pass solver: integration, constraint relaxation, finalization.
//!
//! Every tick runs a fixed pipeline of data-parallel passes over the particle
//! array: one integration pass, `solver_iterations` constraint passes, one
//! finalization pass. Each pass flips the double buffer before dispatching,
//! so a kernel only ever reads the previous pass's output. Kernels write
//! nothing but their own particle index; neighbor state is gathered from the
//! frozen read buffer. Passes are separated by a full barrier (the dispatch
//! returns before the next begins).

use crate::buffer::DoubleBuffer;
use crate::dispatch;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::params::{AnchorDrive, TickParams};
use crate::particle::Particle;
use crate::topology::{EdgeKind, Topology};
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

/// Double-buffered PBD solver over a fixed strand topology.
pub struct PbdSolver<F: Float> {
    topology: Topology<F>,
    buffers: DoubleBuffer<Particle<Vec3<F>>>,
    last_mouse: Vec3<F>,
}

impl<F: Float> PbdSolver<F> {
    /// Allocate the particle buffers from a validated topology, in the rest
    /// pose. This is the only allocation the solver ever performs.
    pub fn new(topology: Topology<F>, constraint_distance: F) -> Self {
        let initial = topology.initial_particles(constraint_distance);
        PbdSolver {
            buffers: DoubleBuffer::new(initial),
            topology,
            last_mouse: Vec3::zero(),
        }
    }

    /// Advance the simulation by one tick.
    pub fn step<O: StepObserver>(&mut self, params: &TickParams<F>, observer: &mut O) {
        let u = params.sanitized();
        let mouse_delta = u.mouse.position - self.last_mouse;
        let topo = &self.topology;

        {
            let (read, write) = self.buffers.begin_pass();
            dispatch::fill(write, |i| integrate(i, read, topo, &u));
        }
        observer.on_integrate();

        for iteration in 0..u.solver_iterations {
            let (read, write) = self.buffers.begin_pass();
            dispatch::fill(write, |i| relax(i, read, topo, &u));
            observer.on_constraint_iteration(iteration);
        }

        {
            let (read, write) = self.buffers.begin_pass();
            dispatch::fill(write, |i| finalize(i, read, &u, mouse_delta));
        }
        if u.mouse.cut {
            self.apply_cuts(&u);
        }
        observer.on_finalize();

        self.last_mouse = u.mouse.position;
        observer.on_step_complete();
    }

    /// Sever every edge whose segment passes within the pointer's influence
    /// radius. Clearing the far endpoint's flag in the freshly written buffer
    /// makes the cut permanent: integration copies flags forward from the
    /// read buffer every tick.
    fn apply_cuts(&mut self, u: &TickParams<F>) {
        let topo = &self.topology;
        let particles = self.buffers.current_mut();
        for edge in topo.edges() {
            let severed = match edge.kind {
                EdgeKind::Structural => !particles[edge.v2].is_connected,
                EdgeKind::Cross => !particles[edge.v2].is_connected_left,
            };
            if severed {
                continue;
            }
            let a = particles[edge.v1].position;
            let b = particles[edge.v2].position;
            if segment_distance(u.mouse.position, a, b) < u.mouse.influence_radius {
                match edge.kind {
                    EdgeKind::Structural => particles[edge.v2].is_connected = false,
                    EdgeKind::Cross => particles[edge.v2].is_connected_left = false,
                }
            }
        }
    }

    /// The tick's result buffer, read-only.
    pub fn particles(&self) -> &[Particle<Vec3<F>>] {
        self.buffers.current()
    }

    pub fn particle(&self, index: usize) -> &Particle<Vec3<F>> {
        &self.buffers.current()[index]
    }

    /// Snapshot of all particle positions for presentation.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.buffers.current().iter().map(|p| p.position).collect()
    }

    pub fn particle_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn topology(&self) -> &Topology<F> {
        &self.topology
    }

    /// Ping-pong bookkeeping: whether buffer A is the current result slot.
    /// Flips once per pass, `solver_iterations + 2` times per tick.
    pub fn buffer_parity(&self) -> bool {
        self.buffers.a_is_active()
    }
}

/// Pass 0: Verlet prediction. Anchors are pinned to their target; everyone
/// advances `old_position`.
fn integrate<F: Float>(
    i: usize,
    read: &[Particle<Vec3<F>>],
    topo: &Topology<F>,
    u: &TickParams<F>,
) -> Particle<Vec3<F>> {
    let mut p = read[i];
    if p.is_anchor {
        p.old_position = p.position;
        p.position = anchor_target(&u.anchor, topo.strand_id(i), p.position);
        return p;
    }
    let dt = u.delta_time;
    let inertia = (p.position - p.old_position).scale(F::one() - u.drag);
    let predicted = p.position + inertia + u.external_force.scale(dt * dt);
    p.old_position = p.position;
    p.position = predicted;
    p
}

fn anchor_target<F: Float>(drive: &AnchorDrive<F>, strand: usize, hold: Vec3<F>) -> Vec3<F> {
    match drive {
        AnchorDrive::Hold => hold,
        AnchorDrive::All(target) => *target,
        AnchorDrive::PerStrand(targets) => targets.get(strand).copied().unwrap_or(hold),
    }
}

/// Visit the particles linked to `i` by an active constraint edge.
fn for_linked<F: Float>(
    i: usize,
    read: &[Particle<Vec3<F>>],
    topo: &Topology<F>,
    mut visit: impl FnMut(&Particle<Vec3<F>>),
) {
    let p = &read[i];
    if p.is_connected {
        if let Some(j) = topo.predecessor(i) {
            visit(&read[j]);
        }
    }
    if let Some(j) = topo.successor(i) {
        if read[j].is_connected {
            visit(&read[j]);
        }
    }
    if p.is_connected_left {
        if let Some(j) = topo.left_neighbor(i) {
            visit(&read[j]);
        }
    }
    if let Some(j) = topo.right_neighbor(i) {
        if read[j].is_connected_left {
            visit(&read[j]);
        }
    }
}

/// Pass 1 (iterated): project toward the rest distance on every active edge.
///
/// Gather formulation: particle `i` applies only its own share of each
/// edge's correction (half per free endpoint, the full correction when the
/// far endpoint is an anchor), averaged over its active links. Concurrent
/// kernels never write the same index.
fn relax<F: Float>(
    i: usize,
    read: &[Particle<Vec3<F>>],
    topo: &Topology<F>,
    u: &TickParams<F>,
) -> Particle<Vec3<F>> {
    let mut p = read[i];
    if p.is_anchor {
        return p;
    }
    let rest = u.constraint_distance;
    let mut correction = Vec3::zero();
    let mut links = 0usize;
    for_linked(i, read, topo, |other| {
        correction = correction + link_correction(p.position, other, rest);
        links += 1;
    });
    if links > 0 {
        p.position = p.position + correction.scale(F::one() / F::from_f32(links as f32));
    }
    if topo.is_cross_linked() {
        p.position = p.position - bending_correction(p.position, i, read, topo, u);
    }
    p
}

fn link_correction<F: Float>(pos: Vec3<F>, other: &Particle<Vec3<F>>, rest: F) -> Vec3<F> {
    let delta = other.position - pos;
    let dist = delta.length();
    if dist.is_near_zero(F::from_f32(1e-10)) {
        return Vec3::zero();
    }
    let share = if other.is_anchor { F::one() } else { F::half() };
    delta.scale((dist - rest) * share / dist)
}

/// Out-of-plane resistance: the component of the particle's offset from its
/// linked-neighbor average along the reference normal, scaled by
/// `1 - normal_compliance` and capped at `max_bending`.
fn bending_correction<F: Float>(
    pos: Vec3<F>,
    i: usize,
    read: &[Particle<Vec3<F>>],
    topo: &Topology<F>,
    u: &TickParams<F>,
) -> Vec3<F> {
    let stiffness = F::one() - u.bending.normal_compliance;
    if stiffness.is_near_zero(F::from_f32(1e-10)) {
        return Vec3::zero();
    }
    let mut sum = Vec3::zero();
    let mut count = 0usize;
    for_linked(i, read, topo, |other| {
        sum = sum + other.position;
        count += 1;
    });
    if count == 0 {
        return Vec3::zero();
    }
    let average = sum.scale(F::one() / F::from_f32(count as f32));
    let deviation = (pos - average).dot(u.bending.normal);
    let amount = (deviation * stiffness).clamp(-u.bending.max_bending, u.bending.max_bending);
    u.bending.normal.scale(amount)
}

/// Pass 2: derive velocity, apply pointer attraction.
fn finalize<F: Float>(
    i: usize,
    read: &[Particle<Vec3<F>>],
    u: &TickParams<F>,
    mouse_delta: Vec3<F>,
) -> Particle<Vec3<F>> {
    let mut p = read[i];
    p.velocity = p.implicit_velocity(u.delta_time);
    if u.mouse.pressed
        && !p.is_anchor
        && p.position.distance(u.mouse.position) < u.mouse.influence_radius
    {
        p.position = p.position + mouse_delta;
    }
    p
}

/// Distance from point `p` to the segment `a..b`.
fn segment_distance<F: Float>(p: Vec3<F>, a: Vec3<F>, b: Vec3<F>) -> F {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq.is_near_zero(F::from_f32(1e-20)) {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).saturate();
    p.distance(a + ab.scale(t))
}
