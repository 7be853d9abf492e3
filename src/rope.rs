//! Rope simulation: parallel strands of distance-constrained particles.

use crate::error::SimError;
use crate::float::Float;
use crate::observer::StepObserver;
use crate::params::TickParams;
use crate::particle::Particle;
use crate::solver::PbdSolver;
use crate::topology::Topology;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Construction parameters for a rope simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RopeConfig<F: Float> {
    /// Total particle count; must equal `num_ropes * particles_per_rope`.
    pub number_particles: usize,
    pub num_ropes: usize,
    pub particles_per_rope: usize,
    /// Rest length between neighboring particles, also the initial spacing.
    pub constraint_distance: F,
}

impl<F: Float> Default for RopeConfig<F> {
    fn default() -> Self {
        RopeConfig {
            number_particles: 50,
            num_ropes: 1,
            particles_per_rope: 50,
            constraint_distance: F::one(),
        }
    }
}

/// One or more hanging ropes, simulated by the multi-pass PBD solver.
///
/// Each rope is an independent strand: its first particle is an anchor, the
/// rest are linked to their predecessor. There are no cross-strand
/// constraints; for those, use [`PbdCloth`](crate::PbdCloth).
pub struct PbdRope<F: Float> {
    solver: PbdSolver<F>,
}

impl<F: Float> PbdRope<F> {
    /// Build the rope simulation in its rest pose: straight strands hanging
    /// below their anchors. Fails if the particle count does not match the
    /// strand layout.
    pub fn new(config: RopeConfig<F>) -> Result<Self, SimError> {
        let topology = Topology::rope(
            config.number_particles,
            config.num_ropes,
            config.particles_per_rope,
            config.constraint_distance,
        )?;
        Ok(PbdRope { solver: PbdSolver::new(topology, config.constraint_distance) })
    }

    /// Advance one physics tick.
    pub fn step<O: StepObserver>(&mut self, params: &TickParams<F>, observer: &mut O) {
        self.solver.step(params, observer);
    }

    /// Snapshot of all particle positions for presentation.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.solver.positions()
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

    pub fn solver(&self) -> &PbdSolver<F> {
        &self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoOpStepObserver;
    use crate::params::AnchorDrive;
    use alloc::vec;

    #[test]
    fn rejects_mismatched_count() {
        let config = RopeConfig { number_particles: 7, num_ropes: 2, particles_per_rope: 5, constraint_distance: 1.0f32 };
        assert_eq!(
            PbdRope::new(config).err(),
            Some(SimError::ParticleCountMismatch { expected: 10, got: 7 })
        );
    }

    #[test]
    fn per_strand_anchor_targets() {
        let config = RopeConfig { number_particles: 10, num_ropes: 2, particles_per_rope: 5, constraint_distance: 1.0f32 };
        let mut rope = PbdRope::new(config).unwrap();
        let targets = vec![Vec3::new(-3.0, 5.0, 0.0), Vec3::new(3.0, 5.0, 0.0)];
        let params = TickParams::new().with_anchor(AnchorDrive::PerStrand(targets.clone()));
        rope.step(&params, &mut NoOpStepObserver);
        assert_eq!(rope.particle(0).position, targets[0]);
        assert_eq!(rope.particle(5).position, targets[1]);
    }
}
