//! Error types for simulation construction.

use core::fmt;

/// Errors that can occur while constructing a simulation.
///
/// The steady-state tick loop has no recoverable error paths: per-tick inputs
/// are saturated into range instead of rejected. Everything that can go wrong
/// is caught here, before the first tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Particle count does not match `num_ropes * particles_per_rope`.
    ParticleCountMismatch { expected: usize, got: usize },
    /// Strand layout needs at least one rope with at least one particle.
    InvalidStrandLayout { num_ropes: usize, particles_per_rope: usize },
    /// Cloth needs at least 2 ropes of at least 2 particles to derive a mesh.
    InvalidMeshTopology { num_ropes: usize, particles_per_rope: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ParticleCountMismatch { expected, got } => {
                write!(f, "particle count {} does not match strand layout (expected {})", got, expected)
            }
            SimError::InvalidStrandLayout { num_ropes, particles_per_rope } => {
                write!(f, "invalid strand layout: {} ropes x {} particles", num_ropes, particles_per_rope)
            }
            SimError::InvalidMeshTopology { num_ropes, particles_per_rope } => {
                write!(f, "cloth mesh needs at least 2x2 particles, got {} ropes x {}", num_ropes, particles_per_rope)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SimError {}
