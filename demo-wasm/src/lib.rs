use clothy::{
    AnchorDrive, BendingParams, ClothConfig, MouseState, NoOpStepObserver, PbdCloth, PbdRope,
    RopeConfig, TickParams, Vec3,
};
use wasm_bindgen::prelude::*;

// The host adapter: samples input and the clock once per tick, pushes the
// parameter set into the core, and reads positions back for rendering.

// ---- Rope Demo ----

#[wasm_bindgen]
pub struct RopeDemo {
    rope: PbdRope<f32>,
    elapsed: f32,
    sin_speed: f32,
    sin_radius: f32,
    mouse: MouseState<f32>,
}

#[wasm_bindgen]
impl RopeDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(num_ropes: usize, particles_per_rope: usize, spacing: f32) -> Result<RopeDemo, JsError> {
        let rope = PbdRope::new(RopeConfig {
            number_particles: num_ropes * particles_per_rope,
            num_ropes,
            particles_per_rope,
            constraint_distance: spacing,
        })
        .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(RopeDemo {
            rope,
            elapsed: 0.0,
            sin_speed: 2.0,
            sin_radius: 3.0,
            mouse: MouseState::default(),
        })
    }

    pub fn set_mouse(&mut self, x: f32, y: f32, pressed: bool, radius: f32, cut: bool) {
        self.mouse = MouseState {
            position: Vec3::new(x, y, 0.0),
            pressed,
            influence_radius: radius,
            cut,
        };
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        // swing the anchors on a sine wave
        let anchor_x = (self.elapsed * self.sin_speed).sin() * self.sin_radius;
        let params = TickParams::new()
            .with_delta_time(dt)
            .with_external_force(Vec3::new(0.0, -9.81, 0.0))
            .with_drag(0.01)
            .with_anchor(AnchorDrive::All(Vec3::new(anchor_x, 5.0, 0.0)))
            .with_mouse(self.mouse.clone());
        self.rope.step(&params, &mut NoOpStepObserver);
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] positions
    pub fn positions(&self) -> Vec<f32> {
        let pos = self.rope.positions();
        let mut out = Vec::with_capacity(pos.len() * 3);
        for p in &pos {
            out.push(p.x);
            out.push(p.y);
            out.push(p.z);
        }
        out
    }

    pub fn particle_count(&self) -> usize {
        self.rope.particle_count()
    }
}

// ---- Cloth Demo ----

#[wasm_bindgen]
pub struct ClothDemo {
    cloth: PbdCloth<f32>,
    mouse: MouseState<f32>,
    bending: BendingParams<f32>,
}

#[wasm_bindgen]
impl ClothDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(num_ropes: usize, particles_per_rope: usize, spacing: f32) -> Result<ClothDemo, JsError> {
        let cloth = PbdCloth::new(ClothConfig {
            number_particles: num_ropes * particles_per_rope,
            num_ropes,
            particles_per_rope,
            constraint_distance: spacing,
        })
        .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(ClothDemo {
            cloth,
            mouse: MouseState::default(),
            bending: BendingParams {
                max_bending: 0.1,
                normal_compliance: 0.5,
                normal: Vec3::new(0.0, 0.0, 1.0),
            },
        })
    }

    pub fn set_mouse(&mut self, x: f32, y: f32, pressed: bool, radius: f32, cut: bool) {
        self.mouse = MouseState {
            position: Vec3::new(x, y, 0.0),
            pressed,
            influence_radius: radius,
            cut,
        };
    }

    pub fn set_bending(&mut self, max_bending: f32, normal_compliance: f32) {
        self.bending.max_bending = max_bending;
        self.bending.normal_compliance = normal_compliance;
    }

    pub fn update(&mut self, dt: f32, wind_x: f32) {
        let params = TickParams::new()
            .with_delta_time(dt)
            .with_external_force(Vec3::new(wind_x, -9.81, 0.0))
            .with_drag(0.02)
            .with_mouse(self.mouse.clone())
            .with_bending(self.bending.clone());
        self.cloth.step(&params, &mut NoOpStepObserver);
    }

    /// Returns flat [x0, y0, z0, x1, y1, z1, ...] positions in strand order
    pub fn positions(&self) -> Vec<f32> {
        let pos = self.cloth.positions();
        let mut out = Vec::with_capacity(pos.len() * 3);
        for p in &pos {
            out.push(p.x);
            out.push(p.y);
            out.push(p.z);
        }
        out
    }

    /// Triangle index list for the presentation mesh, fixed per simulation.
    pub fn triangle_indices(&self) -> Vec<u32> {
        self.cloth.triangle_indices()
    }

    pub fn particle_count(&self) -> usize {
        self.cloth.particle_count()
    }
}
