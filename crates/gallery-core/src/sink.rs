use crate::camera::Camera;
use glam::{Mat4, Vec4};

/// Index of a plane owned by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlaneId(pub usize);

/// GPU-side handle a frame pushes per-plane state into.
///
/// Uploads are fire-and-forget: the renderer consumes them on the next
/// [`SceneRenderer::render`] in the same frame.
pub trait PlaneSink {
    fn set_transform(&mut self, plane: PlaneId, transform: Mat4);
    /// Replace the plane's displacement texture (`size × size` RGBA f32 texels).
    fn upload_field(&mut self, plane: PlaneId, size: usize, texels: &[f32]);
}

/// Scalar uniforms shared by every plane in a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    /// Drawing-buffer width, height, pixel ratio and aspect.
    pub resolution: Vec4,
}

pub trait SceneRenderer: PlaneSink {
    type Error: std::error::Error;

    fn render(&mut self, camera: &Camera, frame: &FrameUniforms) -> Result<(), Self::Error>;
}
