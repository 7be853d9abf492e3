//! Position-based dynamics for ropes and cloth.
//!
//! `clothy` simulates strands of Verlet particles with distance and bending
//! constraints, solved by a fixed number of relaxation passes per tick over a
//! double-buffered particle array. Designed for interactive use: anchors can
//! be driven externally (pointer, scripted motion), and a pointer can attract
//! particles or cut edges.
//!
//! # Features
//!
//! - **Verlet integration**: implicit velocity from position history
//! - **Distance constraints**: strand links plus cross links for cloth
//! - **Bending control**: normal-compliance term for cloth stiffness
//! - **Double buffering**: every pass reads a frozen prior state
//! - **Cutting & anchoring**: pointer-driven tears, per-strand anchor targets
//! - **Observable**: monitor pass boundaries via the `StepObserver` trait
//! - **`no_std` compatible**: optional `parallel` feature for rayon dispatch
//!
//! The host owns presentation and input: it pushes a [`TickParams`] in once
//! per physics tick and reads the resulting positions back out. The core
//! never touches ambient time or input devices, so ticks are deterministic.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod topology;
pub mod buffer;
pub mod dispatch;
pub mod params;
pub mod solver;
pub mod rope;
pub mod cloth;
pub mod observer;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use particle::Particle;
pub use topology::{Edge, EdgeKind, Strand, Topology};
pub use buffer::DoubleBuffer;
pub use params::{AnchorDrive, BendingParams, MouseState, TickParams};
pub use solver::PbdSolver;
pub use rope::{PbdRope, RopeConfig};
pub use cloth::{ClothConfig, PbdCloth};
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::SimError;
