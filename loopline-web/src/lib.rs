/// Loopline Web - WASM bridge for browser embedders
///
/// The motion core runs in WASM; rendering stays with the embedding page's
/// scene-graph library. The page builds its scene from the blueprint
/// accessors, forwards pointer and resize events, and asks for fresh poses
/// once per animation frame.

use js_sys::Float32Array;
use loopline_core::{
    Camera, MotionConfig, PursuitConfig, PursuitPhase, SceneBlueprint, SceneNode, Session,
};
use wasm_bindgen::prelude::*;

fn node_floats(node: &SceneNode) -> Float32Array {
    let p = node.pose.position;
    let data = [
        node.dims.x,
        node.dims.y,
        node.dims.z,
        node.color.r,
        node.color.g,
        node.color.b,
        p.x,
        p.y,
        p.z,
        node.pose.yaw,
    ];
    Float32Array::from(&data[..])
}

/// One viewer's animation state, driven by the embedding page.
#[wasm_bindgen]
pub struct BrowserSession {
    blueprint: SceneBlueprint,
    session: Session,
    camera: Camera,
}

#[wasm_bindgen]
impl BrowserSession {
    /// Build a session for the given viewport. `now_ms` is the page clock
    /// (e.g. `performance.now()`); all later calls must use the same clock.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, now_ms: f64) -> Result<BrowserSession, JsValue> {
        let blueprint = SceneBlueprint::office_diorama();
        let session = Session::new(
            MotionConfig::default(),
            PursuitConfig::default(),
            &blueprint.track,
            now_ms,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(BrowserSession {
            blueprint,
            session,
            camera: Camera::new(width, height),
        })
    }

    /// Forward one pointer sample (`event.clientX` and the page clock).
    pub fn pointer_moved(&mut self, client_x: f32, now_ms: f64) {
        self.session.pointer_moved(client_x, now_ms);
    }

    /// Update the viewport; returns the new camera aspect ratio for the
    /// embedder's projection update.
    pub fn resized(&mut self, width: u32, height: u32) -> f32 {
        self.camera.set_viewport(width, height);
        self.camera.aspect
    }

    /// Advance one frame. Returns
    /// `[train x, y, z, yaw, bird x, y, z, yaw, perched]`
    /// with `perched` as 0.0 or 1.0.
    pub fn tick(&mut self, now_ms: f64) -> Float32Array {
        let poses = self.session.tick(now_ms);
        let train = poses.train.position;
        let bird = poses.bird.position;
        let perched = if poses.bird_phase == PursuitPhase::Perched {
            1.0
        } else {
            0.0
        };
        let data = [
            train.x,
            train.y,
            train.z,
            poses.train.yaw,
            bird.x,
            bird.y,
            bird.z,
            poses.bird.yaw,
            perched,
        ];
        Float32Array::from(&data[..])
    }

    pub fn speed(&self) -> f32 {
        self.session.speed()
    }

    /// Sky color as `[r, g, b]` in linear `[0, 1]`.
    pub fn background(&self) -> Float32Array {
        let c = self.blueprint.background;
        Float32Array::from(&[c.r, c.g, c.b][..])
    }

    /// Unit vector toward the light source, `[x, y, z]`.
    pub fn light_direction(&self) -> Float32Array {
        let l = self.blueprint.light_direction;
        Float32Array::from(&[l.x, l.y, l.z][..])
    }

    /// Camera parameters:
    /// `[pos x, y, z, target x, y, z, fov (radians), aspect, near, far]`.
    pub fn camera_params(&self) -> Float32Array {
        let c = &self.camera;
        let data = [
            c.position.x,
            c.position.y,
            c.position.z,
            c.target.x,
            c.target.y,
            c.target.z,
            c.fov,
            c.aspect,
            c.near,
            c.far,
        ];
        Float32Array::from(&data[..])
    }

    pub fn static_count(&self) -> u32 {
        self.blueprint.statics.len() as u32
    }

    /// One static node as
    /// `[width, height, depth, r, g, b, x, y, z, yaw]`.
    pub fn static_node(&self, index: u32) -> Option<Float32Array> {
        self.blueprint.statics.get(index as usize).map(node_floats)
    }

    pub fn static_name(&self, index: u32) -> Option<String> {
        self.blueprint
            .statics
            .get(index as usize)
            .map(|node| node.name.to_string())
    }

    /// The train's node (same layout as `static_node`); the pose is the
    /// starting placement, poses after that come from `tick`.
    pub fn train_node(&self) -> Float32Array {
        node_floats(&self.blueprint.train)
    }

    pub fn bird_node(&self) -> Float32Array {
        node_floats(&self.blueprint.bird)
    }
}
