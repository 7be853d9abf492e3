//! Cloth simulation: a grid of strands with cross links and bending control.

use crate::error::SimError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::params::TickParams;
use crate::particle::Particle;
use crate::solver::PbdSolver;
use crate::topology::Topology;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Construction parameters for a cloth simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClothConfig<F: Float> {
    /// Total particle count; must equal `num_ropes * particles_per_rope`.
    pub number_particles: usize,
    /// Grid columns (strands).
    pub num_ropes: usize,
    /// Grid rows (particles along each strand).
    pub particles_per_rope: usize,
    /// Rest length of every constraint edge, also the grid spacing.
    pub constraint_distance: F,
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        ClothConfig {
            number_particles: 100,
            num_ropes: 10,
            particles_per_rope: 10,
            constraint_distance: F::one(),
        }
    }
}

/// A cloth sheet: strand particles cross-linked to the neighboring strand,
/// with an out-of-plane bending term controlled per tick through
/// [`BendingParams`](crate::BendingParams).
pub struct PbdCloth<F: Float> {
    solver: PbdSolver<F>,
}

impl<F: Float> PbdCloth<F> {
    /// Build the cloth in its rest pose. Fails if the particle count does not
    /// match the grid, or the grid is too small to carry a triangle mesh.
    pub fn new(config: ClothConfig<F>) -> Result<Self, SimError> {
        let topology = Topology::cloth(
            config.number_particles,
            config.num_ropes,
            config.particles_per_rope,
            config.constraint_distance,
        )?;
        Ok(PbdCloth { solver: PbdSolver::new(topology, config.constraint_distance) })
    }

    /// Advance one physics tick.
    pub fn step<O: StepObserver>(&mut self, params: &TickParams<F>, observer: &mut O) {
        self.solver.step(params, observer);
    }

    /// Snapshot of all particle positions for presentation. Index `i` is the
    /// mesh vertex `i` of [`triangle_indices`](PbdCloth::triangle_indices).
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.solver.positions()
    }

    /// Triangle index list for a presentation mesh, two triangles per grid
    /// quad. Fixed for the lifetime of the simulation.
    pub fn triangle_indices(&self) -> AllocVec<u32> {
        self.solver.topology().triangle_indices()
    }

    pub fn particle(&self, index: usize) -> &Particle<Vec3<F>> {
        self.solver.particle(index)
    }

    pub fn particle_count(&self) -> usize {
        self.solver.particle_count()
    }

    /// Whether particle `index` is still linked to its strand predecessor.
    pub fn is_connected(&self, index: usize) -> bool {
        self.solver.particle(index).is_connected
    }

    /// Whether particle `index` is still linked to the neighboring strand.
    pub fn is_connected_left(&self, index: usize) -> bool {
        self.solver.particle(index).is_connected_left
    }

    pub fn solver(&self) -> &PbdSolver<F> {
        &self.solver
    }
}
