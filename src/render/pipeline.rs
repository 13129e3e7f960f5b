//! The transform, cull, light, project and sort pipeline.
//!
//! Every call recomputes the frame from scratch:
//!
//! 1. view and projection matrices from the camera
//! 2. per model: local → world → view for every vertex
//! 3. per face: near-plane reject, backface cull, flat shading, projection,
//!    viewport mapping
//! 4. painter's algorithm: stable sort by average view depth, farthest first
//! 5. emit background, faces and the optional axis gizmo to the surface
//!
//! Faces that fail a geometric test are dropped for the current frame only.
//! There is no clipping and no depth buffer.

use tracing::{trace, warn};

use super::{RenderSettings, RenderStats, Surface, Viewport, AXIS_WIDTH, OUTLINE_WIDTH};
use crate::camera::Camera;
use crate::colors::{self, Color};
use crate::light::DirectionalLight;
use crate::math::mat4::Mat4;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::model::{Face, Model};
use crate::scene::Scene;

/// Length of each world axis line.
const AXIS_LENGTH: f32 = 2.2;

/// A visible face, projected and shaded, waiting to be painted.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceToDraw {
    /// Screen-space outline in pixels.
    pub points: Vec<Vec2>,
    /// Mean view-space depth of the face's vertices. Sort key.
    pub depth: f32,
    pub fill_color: Color,
    pub outline_color: Color,
    pub fill: bool,
    pub outline: bool,
}

/// Matrices and limits shared by every face of a frame.
struct FrameContext {
    view: Mat4,
    projection: Mat4,
    near: f32,
    viewport: Viewport,
}

impl FrameContext {
    /// Projects a view-space point to pixels. `None` if the projection is NaN.
    fn project(&self, view_point: Vec3) -> Option<Vec2> {
        let ndc = self.projection * view_point;
        if ndc.x.is_nan() || ndc.y.is_nan() {
            return None;
        }
        Some(self.viewport.to_screen(ndc))
    }

    /// Full world → pixel path for a single point, with the near-plane test.
    fn project_world_point(&self, world_point: Vec3) -> Option<Vec2> {
        let view_point = self.view * world_point;
        if view_point.z <= self.near {
            return None;
        }
        self.project(view_point)
    }
}

/// The software render pipeline.
///
/// Holds scratch buffers so repeated frames do not reallocate. The inputs to
/// [`Pipeline::render`] are only read.
#[derive(Debug, Default)]
pub struct Pipeline {
    world_vertices: Vec<Vec3>,
    view_vertices: Vec<Vec3>,
    faces: Vec<FaceToDraw>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one frame of `scene` onto `surface` and reports what was drawn.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        viewport: Viewport,
        scene: &Scene,
        camera: &Camera,
        light: &DirectionalLight,
        settings: &RenderSettings,
    ) -> RenderStats {
        if viewport.is_empty() {
            warn!(?viewport, "rendering into an empty viewport");
        }
        surface.fill_background(viewport, colors::SKY_TOP, colors::SKY_BOTTOM);

        let ctx = FrameContext {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            near: camera.near_plane(),
            viewport,
        };

        self.build_draw_list(&ctx, scene, light, settings);
        sort_back_to_front(&mut self.faces);

        for face in &self.faces {
            if face.fill {
                surface.fill_polygon(&face.points, face.fill_color);
            }
            if face.outline {
                surface.stroke_polygon(&face.points, face.outline_color, OUTLINE_WIDTH);
            }
        }

        if settings.draw_world_axes {
            draw_world_axes(surface, &ctx);
        }

        let stats = RenderStats {
            object_count: scene.len(),
            face_count: self.faces.len(),
        };
        trace!(
            objects = stats.object_count,
            faces = stats.face_count,
            "frame rendered"
        );
        stats
    }

    /// The sorted draw list of the most recent frame.
    pub fn faces(&self) -> &[FaceToDraw] {
        &self.faces
    }

    fn build_draw_list(
        &mut self,
        ctx: &FrameContext,
        scene: &Scene,
        light: &DirectionalLight,
        settings: &RenderSettings,
    ) {
        let Self {
            world_vertices,
            view_vertices,
            faces,
        } = self;
        faces.clear();

        for model in scene.models() {
            transform_vertices(model, ctx.view, world_vertices, view_vertices);

            for face in model.faces() {
                if face.is_degenerate() {
                    continue;
                }
                if let Some(draw) = shade_face(
                    face,
                    model.base_color(),
                    world_vertices,
                    view_vertices,
                    ctx,
                    light,
                    settings,
                ) {
                    faces.push(draw);
                }
            }
        }
    }
}

/// Sorts faces by depth, farthest first. Stable: equal depths keep their order.
pub fn sort_back_to_front(faces: &mut [FaceToDraw]) {
    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Fills `world` and `view` with the model's vertices in world and view space.
fn transform_vertices(model: &Model, view: Mat4, world: &mut Vec<Vec3>, view_out: &mut Vec<Vec3>) {
    let model_matrix = model.transform().to_matrix();
    world.clear();
    view_out.clear();
    for &local in model.vertices() {
        let w = model_matrix * local;
        world.push(w);
        view_out.push(view * w);
    }
}

/// Normal of the plane through a face's first three vertices.
fn face_normal(vertices: &[Vec3], indices: &[usize]) -> Vec3 {
    let v0 = vertices[indices[0]];
    let v1 = vertices[indices[1]];
    let v2 = vertices[indices[2]];
    (v1 - v0).cross(v2 - v0).normalize()
}

/// Runs one face through near-plane, culling, lighting and projection.
/// Returns `None` when the face is not drawn this frame.
fn shade_face(
    face: &Face,
    base_color: Color,
    world: &[Vec3],
    view: &[Vec3],
    ctx: &FrameContext,
    light: &DirectionalLight,
    settings: &RenderSettings,
) -> Option<FaceToDraw> {
    let indices = face.indices();

    // Conservative: any vertex at or behind the near plane drops the whole face.
    if indices.iter().any(|&i| view[i].z <= ctx.near) {
        return None;
    }

    let count = indices.len() as f32;
    let depth = indices.iter().map(|&i| view[i].z).sum::<f32>() / count;
    let centroid = Vec3::mean(indices.iter().map(|&i| view[i]));

    // The camera sits at the view-space origin, so the centroid is the view ray.
    let view_normal = face_normal(view, indices);
    if settings.backface_culling && view_normal.dot(centroid) >= 0.0 {
        return None;
    }

    let world_normal = face_normal(world, indices);
    let shade = light.shade(world_normal);

    let points = indices
        .iter()
        .map(|&i| ctx.project(view[i]))
        .collect::<Option<Vec<_>>>()?;

    let mode = settings.render_mode;
    Some(FaceToDraw {
        points,
        depth,
        fill_color: base_color.scaled(shade),
        outline_color: colors::OUTLINE,
        fill: mode.fills(),
        outline: mode.outlines(),
    })
}

fn draw_world_axes<S: Surface + ?Sized>(surface: &mut S, ctx: &FrameContext) {
    let axes = [
        (Vec3::new(AXIS_LENGTH, 0.0, 0.0), colors::AXIS_X),
        (Vec3::new(0.0, AXIS_LENGTH, 0.0), colors::AXIS_Y),
        (Vec3::new(0.0, 0.0, AXIS_LENGTH), colors::AXIS_Z),
    ];
    for (tip, color) in axes {
        let (Some(from), Some(to)) = (
            ctx.project_world_point(Vec3::ZERO),
            ctx.project_world_point(tip),
        ) else {
            continue;
        };
        surface.draw_line(from, to, color, AXIS_WIDTH);
    }
}
