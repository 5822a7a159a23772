//! Orthographic 2D camera and device → world unprojection.

use cgmath::{Matrix4, SquareMatrix, Vector2, Vector3, vec2, vec3, vec4};

/// Converts device (window pixel) coordinates into world coordinates.
pub trait Unproject {
    /// `screen.x`/`screen.y` are pixels with the origin at the top-left corner,
    /// `screen.z` is a depth in `[0, 1]`.
    fn unproject(&self, screen: Vector3<f32>) -> Vector3<f32>;
}

/// Orthographic camera looking down the z axis, y up in world space.
#[derive(Debug, Clone)]
pub struct OrthoCamera {
    pub position: Vector2<f32>,
    pub zoom: f32,
    viewport: Vector2<f32>,
    screen: Vector2<f32>,
    inv_combined: Matrix4<f32>,
}

impl OrthoCamera {
    /// Camera whose view covers `(0, 0)..(width, height)` on a window of the
    /// same pixel size.
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position: vec2(viewport_width * 0.5, viewport_height * 0.5),
            zoom: 1.0,
            viewport: vec2(viewport_width, viewport_height),
            screen: vec2(viewport_width, viewport_height),
            inv_combined: Matrix4::identity(),
        };
        camera.update();
        camera
    }

    pub fn viewport(&self) -> Vector2<f32> {
        self.viewport
    }

    /// Window size in pixels. Call when the window is resized.
    pub fn resize(&mut self, screen_width: f32, screen_height: f32) {
        self.screen = vec2(screen_width, screen_height);
    }

    /// Recomputes the cached inverse projection. Call after changing
    /// `position` or `zoom`.
    pub fn update(&mut self) {
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            log::warn!("CAMERA: Invalid zoom {}, keeping previous transform", self.zoom);
            return;
        }

        let half_w = self.viewport.x * self.zoom * 0.5;
        let half_h = self.viewport.y * self.zoom * 0.5;
        let projection = cgmath::ortho(-half_w, half_w, -half_h, half_h, 0.0, 100.0);
        let view = Matrix4::from_translation(vec3(-self.position.x, -self.position.y, 0.0));

        match (projection * view).invert() {
            Some(inv) => self.inv_combined = inv,
            None => log::warn!(
                "CAMERA: Degenerate viewport {:?}, keeping previous transform",
                self.viewport
            ),
        }
    }
}

impl Unproject for OrthoCamera {
    fn unproject(&self, screen: Vector3<f32>) -> Vector3<f32> {
        let ndc = vec4(
            2.0 * screen.x / self.screen.x - 1.0,
            2.0 * (self.screen.y - screen.y) / self.screen.y - 1.0,
            2.0 * screen.z - 1.0,
            1.0,
        );
        let world = self.inv_combined * ndc;
        world.truncate() / world.w
    }
}
