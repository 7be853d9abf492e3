//! Verlet particles with strand connectivity flags.

use crate::float::Float;
use crate::vec::Vec;

/// One particle record in the simulation buffers.
///
/// Mirrors the 32-byte vertex record the passes operate on: current and
/// previous position for Verlet velocity derivation, a cached velocity for
/// interaction effects, and the fixed connectivity flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle<V: Vec> {
    /// Current world position.
    pub position: V,
    /// Position at the previous tick (implicit velocity source).
    pub old_position: V,
    /// Velocity derived during finalization, `(position - old_position) / dt`.
    pub velocity: V,
    /// Pinned: excluded from force integration, driven by the anchor target.
    pub is_anchor: bool,
    /// Participates in a distance constraint to its strand predecessor.
    pub is_connected: bool,
    /// Participates in a cross-strand constraint to its left neighbor.
    pub is_connected_left: bool,
    /// Index of the first particle of this particle's strand.
    pub root_idx: usize,
}

impl<V: Vec> Particle<V> {
    /// A free particle at rest: connected to its predecessor, not pinned.
    pub fn free(position: V, root_idx: usize) -> Self {
        Particle {
            position,
            old_position: position,
            velocity: V::zero(),
            is_anchor: false,
            is_connected: true,
            is_connected_left: false,
            root_idx,
        }
    }

    /// An anchor particle: pinned, no predecessor link.
    pub fn anchor(position: V, root_idx: usize) -> Self {
        Particle {
            position,
            old_position: position,
            velocity: V::zero(),
            is_anchor: true,
            is_connected: false,
            is_connected_left: false,
            root_idx,
        }
    }

    /// Velocity implied by the position history, without touching the cache.
    pub fn implicit_velocity(&self, dt: V::Scalar) -> V {
        if dt.is_near_zero(V::Scalar::from_f32(1e-30)) {
            return V::zero();
        }
        (self.position - self.old_position).scale(V::Scalar::one() / dt)
    }
}
