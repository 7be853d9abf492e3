//! Per-tick parameter set pushed into the solver.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

/// How anchor particles are driven this tick.
#[derive(Clone, Debug, PartialEq)]
pub enum AnchorDrive<F: Float> {
    /// Anchors hold their current position.
    Hold,
    /// Every anchor moves to the same target.
    All(Vec3<F>),
    /// Anchor of strand `k` moves to `targets[k]`; strands past the end of
    /// the list hold position.
    PerStrand(AllocVec<Vec3<F>>),
}

/// Pointer state sampled by the host once per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct MouseState<F: Float> {
    /// Pointer position in world space.
    pub position: Vec3<F>,
    /// Primary button held: enables attraction within the influence radius.
    pub pressed: bool,
    /// Radius of pointer influence for attraction and cutting.
    pub influence_radius: F,
    /// Cut trigger: edges within the influence radius are severed.
    pub cut: bool,
}

impl<F: Float> Default for MouseState<F> {
    fn default() -> Self {
        MouseState {
            position: Vec3::zero(),
            pressed: false,
            influence_radius: F::zero(),
            cut: false,
        }
    }
}

/// Bending stiffness controls for cloth.
#[derive(Clone, Debug, PartialEq)]
pub struct BendingParams<F: Float> {
    /// Upper bound on the per-iteration bending correction.
    pub max_bending: F,
    /// 0 = rigid (full out-of-plane correction), 1 = fully compliant (none).
    pub normal_compliance: F,
    /// Reference normal the cloth resists deviating from.
    pub normal: Vec3<F>,
}

impl<F: Float> Default for BendingParams<F> {
    fn default() -> Self {
        BendingParams {
            max_bending: F::zero(),
            // fully compliant: bending term off unless configured
            normal_compliance: F::one(),
            normal: Vec3::new(F::zero(), F::zero(), F::one()),
        }
    }
}

/// Everything the solver needs for one tick.
///
/// The host samples its environment (clock, input devices, scripted anchor
/// motion) once per tick and passes the results in here; the core never
/// reaches out to ambient state.
///
/// # Builder Pattern
/// ```
/// use clothy::{TickParams, Vec3};
///
/// let params: TickParams<f32> = TickParams::new()
///     .with_delta_time(1.0 / 60.0)
///     .with_external_force(Vec3::new(0.0, -9.81, 0.0))
///     .with_solver_iterations(10)
///     .with_drag(0.01);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TickParams<F: Float> {
    /// Physics step in seconds.
    pub delta_time: F,
    /// Uniform force applied to every non-anchor particle.
    pub external_force: Vec3<F>,
    /// Rest length enforced between connected particles.
    pub constraint_distance: F,
    /// Velocity damping factor in [0, 1]. 0 = no damping.
    pub drag: F,
    /// Constraint relaxation passes per tick. Default: 10.
    pub solver_iterations: usize,
    /// Anchor driving mode for this tick.
    pub anchor: AnchorDrive<F>,
    /// Pointer interaction state.
    pub mouse: MouseState<F>,
    /// Cloth bending controls; ignored by rope topologies.
    pub bending: BendingParams<F>,
}

impl<F: Float> TickParams<F> {
    /// Create params with default values.
    pub fn new() -> Self {
        TickParams {
            delta_time: F::from_f32(1.0 / 60.0),
            external_force: Vec3::zero(),
            constraint_distance: F::one(),
            drag: F::zero(),
            solver_iterations: 10,
            anchor: AnchorDrive::Hold,
            mouse: MouseState::default(),
            bending: BendingParams::default(),
        }
    }

    /// Set the physics step.
    pub fn with_delta_time(mut self, dt: F) -> Self {
        self.delta_time = dt;
        self
    }

    /// Set the uniform external force.
    pub fn with_external_force(mut self, force: Vec3<F>) -> Self {
        self.external_force = force;
        self
    }

    /// Set the rest length between connected particles.
    pub fn with_constraint_distance(mut self, distance: F) -> Self {
        self.constraint_distance = distance;
        self
    }

    /// Set the damping factor.
    pub fn with_drag(mut self, drag: F) -> Self {
        self.drag = drag;
        self
    }

    /// Set the number of constraint iterations.
    pub fn with_solver_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    /// Set the anchor driving mode.
    pub fn with_anchor(mut self, anchor: AnchorDrive<F>) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the pointer state.
    pub fn with_mouse(mut self, mouse: MouseState<F>) -> Self {
        self.mouse = mouse;
        self
    }

    /// Set the cloth bending controls.
    pub fn with_bending(mut self, bending: BendingParams<F>) -> Self {
        self.bending = bending;
        self
    }

    /// Copy with out-of-range inputs saturated. Per-tick inputs are always
    /// treated as valid; this is where that promise is kept.
    pub fn sanitized(&self) -> Self {
        let mut p = self.clone();
        p.drag = p.drag.saturate();
        p.bending.normal_compliance = p.bending.normal_compliance.saturate();
        p.bending.max_bending = p.bending.max_bending.max(F::zero());
        p.bending.normal = p.bending.normal.normalize();
        p.mouse.influence_radius = p.mouse.influence_radius.max(F::zero());
        p
    }
}

impl<F: Float> Default for TickParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_saturates_ranges() {
        let p: TickParams<f32> = TickParams::new()
            .with_drag(1.5)
            .with_bending(BendingParams {
                max_bending: -0.5,
                normal_compliance: 2.0,
                normal: Vec3::new(0.0, 0.0, 3.0),
            });
        let s = p.sanitized();
        assert_eq!(s.drag, 1.0);
        assert_eq!(s.bending.normal_compliance, 1.0);
        assert_eq!(s.bending.max_bending, 0.0);
        assert!((s.bending.normal.z - 1.0).abs() < 1e-6);
    }
}
