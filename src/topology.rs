//! Strand topology: explicit tables for anchors, links, and edges.
//!
//! All connectivity is derived once at construction and never mutated by the
//! solver. Pass kernels look neighbors up through these tables instead of
//! re-deriving strand membership from index arithmetic.

use crate::error::SimError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// One strand: a linear chain of particles sharing an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strand {
    /// Index of the first particle of the strand.
    pub start: usize,
    /// Number of particles in the strand.
    pub len: usize,
    /// Index of the anchor particle (always `start`).
    pub anchor: usize,
}

/// Which family a constraint edge belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Along-strand link between a particle and its predecessor.
    Structural,
    /// Cross-strand link between a particle and its left neighbor.
    Cross,
}

/// A constraint edge between two particles.
///
/// Semantically undirected, but `v2` is always the "far" endpoint whose
/// connectivity flag represents the edge (and gets cleared on a cut).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge<F: Float> {
    pub v1: usize,
    pub v2: usize,
    /// Rest length at construction time. Ticks may override it through
    /// [`TickParams::constraint_distance`](crate::TickParams).
    pub rest_length: F,
    pub kind: EdgeKind,
}

/// Fixed connectivity tables for a strand layout.
#[derive(Clone, Debug)]
pub struct Topology<F: Float> {
    strands: AllocVec<Strand>,
    strand_ids: AllocVec<usize>,
    edges: AllocVec<Edge<F>>,
    num_ropes: usize,
    particles_per_rope: usize,
    cross_linked: bool,
}

impl<F: Float> Topology<F> {
    /// Topology for independent ropes: along-strand links only.
    pub fn rope(
        number_particles: usize,
        num_ropes: usize,
        particles_per_rope: usize,
        constraint_distance: F,
    ) -> Result<Self, SimError> {
        Self::build(number_particles, num_ropes, particles_per_rope, constraint_distance, false)
    }

    /// Topology for cloth: along-strand links plus cross links between
    /// adjacent strands. Requires a grid of at least 2x2 particles so a
    /// triangle mesh can be derived.
    pub fn cloth(
        number_particles: usize,
        num_ropes: usize,
        particles_per_rope: usize,
        constraint_distance: F,
    ) -> Result<Self, SimError> {
        if num_ropes < 2 || particles_per_rope < 2 {
            return Err(SimError::InvalidMeshTopology { num_ropes, particles_per_rope });
        }
        Self::build(number_particles, num_ropes, particles_per_rope, constraint_distance, true)
    }

    fn build(
        number_particles: usize,
        num_ropes: usize,
        particles_per_rope: usize,
        constraint_distance: F,
        cross_linked: bool,
    ) -> Result<Self, SimError> {
        if num_ropes == 0 || particles_per_rope == 0 {
            return Err(SimError::InvalidStrandLayout { num_ropes, particles_per_rope });
        }
        let expected = num_ropes * particles_per_rope;
        if number_particles != expected {
            return Err(SimError::ParticleCountMismatch { expected, got: number_particles });
        }

        let mut strands = AllocVec::with_capacity(num_ropes);
        let mut strand_ids = AllocVec::with_capacity(number_particles);
        let mut edges = AllocVec::new();

        for rope in 0..num_ropes {
            let start = rope * particles_per_rope;
            strands.push(Strand { start, len: particles_per_rope, anchor: start });
            for offset in 0..particles_per_rope {
                let i = start + offset;
                strand_ids.push(rope);
                if offset > 0 {
                    edges.push(Edge {
                        v1: i - 1,
                        v2: i,
                        rest_length: constraint_distance,
                        kind: EdgeKind::Structural,
                    });
                }
                if cross_linked && i > particles_per_rope {
                    edges.push(Edge {
                        v1: i - particles_per_rope,
                        v2: i,
                        rest_length: constraint_distance,
                        kind: EdgeKind::Cross,
                    });
                }
            }
        }

        Ok(Topology { strands, strand_ids, edges, num_ropes, particles_per_rope, cross_linked })
    }

    /// Initial particle array: straight strands hanging below their anchors,
    /// strand `k` offset by `k * constraint_distance` along +X.
    pub fn initial_particles(&self, constraint_distance: F) -> AllocVec<Particle<Vec3<F>>> {
        let n = self.particle_count();
        let mut particles = AllocVec::with_capacity(n);
        for (rope, strand) in self.strands.iter().enumerate() {
            let x = F::from_f32(rope as f32) * constraint_distance;
            for offset in 0..strand.len {
                let i = strand.start + offset;
                let y = -(F::from_f32(offset as f32) * constraint_distance);
                let position = Vec3::new(x, y, F::zero());
                let mut p = if offset == 0 {
                    Particle::anchor(position, strand.start)
                } else {
                    Particle::free(position, strand.start)
                };
                p.is_connected_left = self.cross_linked && i > self.particles_per_rope;
                particles.push(p);
            }
        }
        particles
    }

    /// Triangle index list for a presentation mesh over the cloth grid.
    ///
    /// Two triangles per grid quad, `(num_ropes-1) * (particles_per_rope-1) * 6`
    /// indices total. Empty for rope topologies.
    pub fn triangle_indices(&self) -> AllocVec<u32> {
        if !self.cross_linked {
            return AllocVec::new();
        }
        let ppr = self.particles_per_rope;
        let num_indices = (self.num_ropes - 1) * (ppr - 1) * 6;
        let mut tri = AllocVec::with_capacity(num_indices);
        let mut j = 0u32;
        let ppr32 = ppr as u32;
        while tri.len() < num_indices {
            tri.push(j);
            tri.push(j + ppr32 + 1);
            tri.push(j + 1);
            tri.push(j + ppr32);
            tri.push(j + ppr32 + 1);
            tri.push(j);
            // skip the last particle of each strand, it owns no quad
            j = if (j + 1) % ppr32 == ppr32 - 1 { j + 2 } else { j + 1 };
        }
        tri
    }

    /// Predecessor along the strand, `None` at the strand start.
    pub fn predecessor(&self, i: usize) -> Option<usize> {
        let strand = self.strand_of(i);
        if i > strand.start { Some(i - 1) } else { None }
    }

    /// Successor along the strand, `None` at the strand end.
    pub fn successor(&self, i: usize) -> Option<usize> {
        let strand = self.strand_of(i);
        if i + 1 < strand.start + strand.len { Some(i + 1) } else { None }
    }

    /// Same-offset particle in the previous strand, when cross-linked.
    pub fn left_neighbor(&self, i: usize) -> Option<usize> {
        if self.cross_linked && i >= self.particles_per_rope {
            Some(i - self.particles_per_rope)
        } else {
            None
        }
    }

    /// Same-offset particle in the next strand, when cross-linked.
    pub fn right_neighbor(&self, i: usize) -> Option<usize> {
        let j = i + self.particles_per_rope;
        if self.cross_linked && j < self.particle_count() {
            Some(j)
        } else {
            None
        }
    }

    /// Strand descriptor for particle `i`.
    pub fn strand_of(&self, i: usize) -> &Strand {
        &self.strands[self.strand_ids[i]]
    }

    /// Strand index for particle `i`.
    pub fn strand_id(&self, i: usize) -> usize {
        self.strand_ids[i]
    }

    pub fn strands(&self) -> &[Strand] {
        &self.strands
    }

    pub fn edges(&self) -> &[Edge<F>] {
        &self.edges
    }

    pub fn particle_count(&self) -> usize {
        self.num_ropes * self.particles_per_rope
    }

    pub fn num_ropes(&self) -> usize {
        self.num_ropes
    }

    pub fn particles_per_rope(&self) -> usize {
        self.particles_per_rope
    }

    pub fn is_cross_linked(&self) -> bool {
        self.cross_linked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rope_strand_table() {
        let topo = Topology::<f32>::rope(10, 2, 5, 1.0).unwrap();
        assert_eq!(topo.strands().len(), 2);
        assert_eq!(topo.strands()[1], Strand { start: 5, len: 5, anchor: 5 });
        assert_eq!(topo.strand_id(7), 1);
        assert_eq!(topo.predecessor(5), None);
        assert_eq!(topo.predecessor(6), Some(5));
        assert_eq!(topo.successor(4), None);
        assert_eq!(topo.left_neighbor(7), None);
    }

    #[test]
    fn rope_edge_count() {
        let topo = Topology::<f32>::rope(10, 2, 5, 1.0).unwrap();
        // 4 structural edges per strand
        assert_eq!(topo.edges().len(), 8);
        assert!(topo.edges().iter().all(|e| e.kind == EdgeKind::Structural));
    }

    #[test]
    fn cloth_cross_edges_skip_first_strand() {
        let topo = Topology::<f32>::cloth(6, 2, 3, 1.0).unwrap();
        let cross: AllocVec<_> =
            topo.edges().iter().filter(|e| e.kind == EdgeKind::Cross).collect();
        // i > particles_per_rope: particles 4 and 5
        assert_eq!(cross.len(), 2);
        assert_eq!((cross[0].v1, cross[0].v2), (1, 4));
        assert_eq!((cross[1].v1, cross[1].v2), (2, 5));
    }

    #[test]
    fn count_mismatch_rejected() {
        assert_eq!(
            Topology::<f32>::rope(9, 2, 5, 1.0).err(),
            Some(SimError::ParticleCountMismatch { expected: 10, got: 9 })
        );
    }

    #[test]
    fn degenerate_layout_rejected() {
        assert!(matches!(
            Topology::<f32>::rope(0, 0, 5, 1.0),
            Err(SimError::InvalidStrandLayout { .. })
        ));
        assert!(matches!(
            Topology::<f32>::cloth(5, 1, 5, 1.0),
            Err(SimError::InvalidMeshTopology { .. })
        ));
    }

    #[test]
    fn initial_pose_hangs_below_anchor() {
        let topo = Topology::<f32>::rope(5, 1, 5, 1.0).unwrap();
        let particles = topo.initial_particles(1.0);
        assert_eq!(particles[0].position, Vec3::new(0.0, 0.0, 0.0));
        assert!(particles[0].is_anchor && !particles[0].is_connected);
        assert_eq!(particles[4].position, Vec3::new(0.0, -4.0, 0.0));
        assert!(particles[4].is_connected);
        assert!(particles.iter().all(|p| p.root_idx == 0));
    }

    #[test]
    fn triangle_indices_match_grid() {
        let topo = Topology::<f32>::cloth(6, 2, 3, 1.0).unwrap();
        let tri = topo.triangle_indices();
        assert_eq!(tri.len(), 12);
        assert_eq!(&tri[..6], &[0, 4, 1, 3, 4, 0]);
        assert_eq!(&tri[6..], &[1, 5, 2, 4, 5, 1]);
    }
}
