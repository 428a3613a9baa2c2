//! Software preview renderer for recording frames.
//!
//! Projects every scene object through the camera and draws it as a flat splat
//! (square for boxes, disc for spheres), far to near. Shading is a single
//! Lambert term facing the camera plus ambient, blended into linear fog.

use std::path::Path;

use glam::Vec3;
use image::{Rgba, RgbaImage};

use crate::error::Result;
use crate::grid::InstanceScene;
use crate::params::{Color, ElementShape, RenderConfig};
use crate::stage::Stage;

/// Surface normal used for every splat (faces the default camera)
const SPLAT_NORMAL: Vec3 = Vec3::Z;

struct Splat {
    center: (f32, f32),
    radius_px: f32,
    depth: f32,
    shape: ElementShape,
    color: [u8; 3],
}

/// Renders a stage with an [`InstanceScene`] into RGBA images
#[derive(Debug, Clone, Default)]
pub struct PreviewRenderer {
    config: RenderConfig,
}

impl PreviewRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, stage: &Stage<InstanceScene>) -> RgbaImage {
        let (width, height) = (self.config.width, self.config.height);
        let style = stage.style();
        let camera = stage.camera();
        let view_proj = camera.view_proj(&self.config);
        let view = camera.view_matrix();
        let focal_px = camera.focal_length_px(height);
        let near = camera.framing().near_m;
        let sun = stage.sun_position();

        let [r, g, b] = style.clear_color.to_rgb8();
        let mut image = RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255]));

        let mut splats: Vec<Splat> = stage
            .scene()
            .objects()
            .filter_map(|(_, obj)| {
                let depth = -view.transform_point3(obj.translation).z;
                if depth <= near {
                    return None;
                }

                let ndc = view_proj.project_point3(obj.translation);
                if !(0.0..=1.0).contains(&ndc.z) {
                    return None;
                }

                let center = (
                    (ndc.x * 0.5 + 0.5) * width as f32,
                    (0.5 - ndc.y * 0.5) * height as f32,
                );
                let radius_px = obj.bounding_radius() * focal_px / depth;

                let to_sun = (sun - obj.translation).normalize_or_zero();
                let lambert = SPLAT_NORMAL.dot(to_sun).max(0.0);
                let light = style.lighting.ambient_color.to_vec3() * style.lighting.ambient_intensity
                    + style.lighting.sun_color.to_vec3() * style.lighting.sun_intensity * lambert;
                let lit = (style.item_color.to_vec3() * light).min(Vec3::ONE);
                let fogged = lit.lerp(style.fog.color.to_vec3(), style.fog.factor(depth));

                Some(Splat {
                    center,
                    radius_px,
                    depth,
                    shape: obj.shape,
                    color: Color::from_vec3(fogged).to_rgb8(),
                })
            })
            .collect();

        // Painter's order: far first
        splats.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for splat in &splats {
            draw_splat(&mut image, splat);
        }
        image
    }

    /// Render the stage and write it as a PNG
    pub fn save_frame(&self, stage: &Stage<InstanceScene>, path: &Path) -> Result<()> {
        let image = self.render(stage);
        image.save(path)?;
        Ok(())
    }
}

fn draw_splat(image: &mut RgbaImage, splat: &Splat) {
    let (cx, cy) = splat.center;
    let radius = splat.radius_px.max(0.5);
    let (width, height) = (image.width() as i64, image.height() as i64);

    let x0 = ((cx - radius).floor() as i64).max(0);
    let x1 = ((cx + radius).ceil() as i64).min(width - 1);
    let y0 = ((cy - radius).floor() as i64).max(0);
    let y1 = ((cy + radius).ceil() as i64).min(height - 1);

    let [r, g, b] = splat.color;
    for y in y0..=y1 {
        for x in x0..=x1 {
            if splat.shape == ElementShape::Sphere {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
            }
            image.put_pixel(x as u32, y as u32, Rgba([r, g, b, 255]));
        }
    }
}
