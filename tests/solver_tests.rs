use clothy::Vec;
use clothy::{MouseState, NoOpStepObserver, PbdRope, RopeConfig, TickParams, Vec3};

fn single_strand(particles: usize) -> PbdRope<f32> {
    PbdRope::new(RopeConfig {
        number_particles: particles,
        num_ropes: 1,
        particles_per_rope: particles,
        constraint_distance: 1.0,
    })
    .unwrap()
}

#[test]
fn satisfied_constraints_are_a_fixed_point() {
    // Rest distances already satisfied, zero force: nothing may move.
    let mut rope = single_strand(5);
    let before = rope.positions();

    let params = TickParams::new().with_solver_iterations(10);
    rope.step(&params, &mut NoOpStepObserver);

    let after = rope.positions();
    for (i, (a, b)) in before.iter().zip(after.iter()).enumerate() {
        assert_eq!(a, b, "particle {} moved from {:?} to {:?}", i, a, b);
    }
}

#[test]
fn non_unit_spacing_rest_pose_is_a_fixed_point() {
    // The rest pose only holds when the tick's constraint distance matches
    // the construction spacing.
    let mut rope = PbdRope::new(RopeConfig {
        number_particles: 5,
        num_ropes: 1,
        particles_per_rope: 5,
        constraint_distance: 0.25f32,
    })
    .unwrap();
    let before = rope.positions();

    let params = TickParams::new().with_constraint_distance(0.25);
    rope.step(&params, &mut NoOpStepObserver);

    assert_eq!(before, rope.positions());
}

#[test]
fn zero_iterations_leave_integration_untouched() {
    let mut rope = single_strand(2);
    let force = Vec3::new(1.0f32, 0.0, 0.0);
    let dt = 0.1f32;
    let params = TickParams::new()
        .with_delta_time(dt)
        .with_external_force(force)
        .with_solver_iterations(0);

    rope.step(&params, &mut NoOpStepObserver);

    // Pure Verlet prediction: pos + (pos - old) * (1 - drag) + force * dt^2.
    // The particle starts at rest, so only the force term contributes.
    let p = rope.particle(1);
    let expected = Vec3::new(force.x * dt * dt, -1.0, 0.0);
    assert!(
        p.position.distance(expected) < 1e-6,
        "solver pass should be a no-op at 0 iterations: got {:?}, expected {:?}",
        p.position, expected,
    );
}

#[test]
fn velocity_derived_from_position_delta() {
    let mut rope = single_strand(2);
    let dt = 0.1f32;
    let params = TickParams::new()
        .with_delta_time(dt)
        .with_external_force(Vec3::new(0.0, 0.0, 2.0))
        .with_solver_iterations(0);

    rope.step(&params, &mut NoOpStepObserver);

    let p = rope.particle(1);
    let expected = (p.position - p.old_position).scale(1.0 / dt);
    assert!(
        p.velocity.distance(expected) < 1e-6,
        "velocity {:?} should equal position delta over dt {:?}",
        p.velocity, expected,
    );
}

#[test]
fn cut_edge_stays_cut_and_free_falls() {
    let mut rope = single_strand(5);

    // Sever the edge between particles 1 and 2: pointer at its midpoint.
    let cut_params = TickParams::new().with_mouse(MouseState {
        position: Vec3::new(0.0, -1.5, 0.0),
        pressed: false,
        influence_radius: 0.3,
        cut: true,
    });
    rope.step(&cut_params, &mut NoOpStepObserver);

    assert!(!rope.is_connected(2), "edge (1,2) should be severed");
    assert!(rope.is_connected(1), "edge (0,1) is outside the cut radius");
    assert!(rope.is_connected(3), "edge (2,3) is outside the cut radius");

    // The freed tail now falls; nothing pulls it back to particle 1.
    let fall = TickParams::new()
        .with_external_force(Vec3::new(0.0, -10.0, 0.0))
        .with_solver_iterations(10);
    for _ in 0..60 {
        rope.step(&fall, &mut NoOpStepObserver);
    }

    assert!(!rope.is_connected(2), "cut must be permanent");
    let gap = rope.particle(1).position.distance(rope.particle(2).position);
    assert!(gap > 2.0, "freed tail should have fallen away, gap is {}", gap);

    // The tail keeps its own internal links while falling.
    let tail_spacing = rope.particle(2).position.distance(rope.particle(3).position);
    assert!(
        (tail_spacing - 1.0).abs() < 0.3,
        "falling tail should stay chained, spacing is {}",
        tail_spacing,
    );

    // The part above the cut still hangs from its anchor.
    let upper = rope.particle(0).position.distance(rope.particle(1).position);
    assert!(
        (upper - 1.0).abs() < 0.3,
        "upper segment should still hang at rest length, got {}",
        upper,
    );
}

#[test]
fn pointer_drags_particles_in_radius() {
    let mut rope = single_strand(2);

    // First tick establishes the pointer position history.
    let settle = TickParams::new().with_mouse(MouseState {
        position: Vec3::new(0.0, -1.0, 0.0),
        pressed: false,
        influence_radius: 0.0,
        cut: false,
    });
    rope.step(&settle, &mut NoOpStepObserver);

    // Pointer moves +0.5 in x while held: in-radius particles follow.
    let drag = TickParams::new().with_mouse(MouseState {
        position: Vec3::new(0.5, -1.0, 0.0),
        pressed: true,
        influence_radius: 10.0,
        cut: false,
    });
    rope.step(&drag, &mut NoOpStepObserver);

    let p = rope.particle(1);
    assert!(
        (p.position.x - 0.5).abs() < 1e-5,
        "particle should be dragged by the pointer motion, x = {}",
        p.position.x,
    );
    let anchor = rope.particle(0);
    assert_eq!(anchor.position.x, 0.0, "anchors are never dragged");
}

#[test]
fn pointer_outside_radius_has_no_effect() {
    let mut rope = single_strand(3);
    let before = rope.positions();

    let params = TickParams::new().with_mouse(MouseState {
        position: Vec3::new(100.0, 100.0, 0.0),
        pressed: true,
        influence_radius: 1.0,
        cut: true,
    });
    rope.step(&params, &mut NoOpStepObserver);

    assert_eq!(before, rope.positions());
    assert!(rope.is_connected(1) && rope.is_connected(2));
}
