use kurbo::Shape as _;

use crate::{
    foundation::{
        core::{Affine, BezPath, Circle, Point, Rgba8},
        error::{StarpathError, StarpathResult},
    },
    scene::model::{RECTANGLE_GROUPS, Scene, TRIANGLE_GROUPS, visible_groups},
};

const CIRCLE_STROKE: Rgba8 = Rgba8::opaque(0xea, 0xea, 0xea);
const OUTLINE_STROKE: Rgba8 = Rgba8::opaque(0xed, 0xc4, 0x2f);
const CENTER_FILL: Rgba8 = Rgba8::opaque(0x6b, 0x72, 0x80);
const CURRENT_SHAPE: Rgba8 = Rgba8::opaque(245, 158, 11);
const TRIANGLE_COLOR: Rgba8 = Rgba8::opaque(239, 68, 68);
const RECTANGLE_COLOR: Rgba8 = Rgba8::opaque(59, 130, 246);
const DOT_PICKED: Rgba8 = Rgba8::opaque(0x11, 0x18, 0x27);
const DOT_FILL: Rgba8 = Rgba8::opaque(0x37, 0x41, 0x51);
const DOT_STROKE: Rgba8 = Rgba8::opaque(0x9c, 0xa3, 0xaf);

const SHAPE_FILL_ALPHA: u8 = 38; // 0.15
const SHAPE_STROKE_ALPHA: u8 = 179; // 0.7
const DOT_RADIUS: f64 = 4.0;
const CURVE_TOLERANCE: f64 = 0.1;

/// Rasterization options.
#[derive(Clone, Copy, Debug)]
pub struct RenderSettings {
    /// Integer upscale of the logical viewport.
    pub scale: u32,
    /// Background color; `None` leaves the frame transparent.
    pub clear_rgba: Option<Rgba8>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scale: 1,
            clear_rgba: Some(Rgba8::opaque(255, 255, 255)),
        }
    }
}

/// Premultiplied RGBA8 output frame.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Rasterize the scene's 400x400 logical viewport into a frame.
///
/// The accumulated display rotation is applied as one rigid transform about
/// the circle center; dot positions and path times are left untouched.
#[tracing::instrument(level = "debug", skip(scene))]
pub fn render_scene(scene: &Scene, settings: &RenderSettings) -> StarpathResult<FrameRgba> {
    if settings.scale == 0 {
        return Err(StarpathError::render("render scale must be > 0"));
    }
    let viewport = crate::foundation::core::Viewport::default();
    let width = viewport.width * settings.scale;
    let height = viewport.height * settings.scale;
    let width_u16: u16 = width
        .try_into()
        .map_err(|_| StarpathError::render("frame width exceeds u16"))?;
    let height_u16: u16 = height
        .try_into()
        .map_err(|_| StarpathError::render("frame height exceeds u16"))?;

    let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
    let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);

    // The context rasterizes into a fresh buffer, so the background is drawn
    // as the first paint rather than by pre-clearing the pixmap.
    if let Some(bg) = settings.clear_rgba {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    }

    let center = scene.figure().config().center;
    let world = Affine::scale(f64::from(settings.scale))
        * Affine::translate(center.to_vec2())
        * Affine::rotate(scene.motion().rotation_deg().to_radians())
        * Affine::translate(-center.to_vec2());
    ctx.set_transform(affine_to_cpu(world));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    draw_backdrop(&mut ctx, scene, center);
    draw_shapes(&mut ctx, scene);
    draw_overlays(&mut ctx, scene);
    draw_dots(&mut ctx, scene);

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRgba {
        width,
        height,
        data: pixmap.data_as_u8_slice().to_vec(),
    })
}

fn draw_backdrop(ctx: &mut vello_cpu::RenderContext, scene: &Scene, center: Point) {
    let radius = scene.figure().config().radius;
    stroke(
        ctx,
        &Circle::new(center, radius).to_path(CURVE_TOLERANCE),
        CIRCLE_STROKE,
        1.0,
    );

    if scene.config().show_outline
        && let Some(outline) = scene.figure().outline()
    {
        stroke(ctx, &outline, OUTLINE_STROKE, 1.5);
    }

    fill(
        ctx,
        &Circle::new(center, 2.0).to_path(CURVE_TOLERANCE),
        CENTER_FILL,
    );
}

fn draw_shapes(ctx: &mut vello_cpu::RenderContext, scene: &Scene) {
    for (i, shape) in scene.picker().completed().iter().enumerate() {
        let color = Rgba8::opaque(
            ((i * 40) % 255) as u8,
            ((i * 70) % 255) as u8,
            ((i * 120) % 255) as u8,
        );
        draw_polygon(ctx, scene, shape, color);
    }

    let current = scene.picker().current();
    if current.len() >= 2 {
        draw_polygon(ctx, scene, current, CURRENT_SHAPE);
    }
}

fn draw_overlays(ctx: &mut vello_cpu::RenderContext, scene: &Scene) {
    let n = scene.motion().dot_count();
    if scene.config().show_triangles {
        for group in visible_groups(&TRIANGLE_GROUPS, n) {
            draw_polygon(ctx, scene, group, TRIANGLE_COLOR);
        }
    }
    if scene.config().show_rectangles {
        for group in visible_groups(&RECTANGLE_GROUPS, n) {
            draw_polygon(ctx, scene, group, RECTANGLE_COLOR);
        }
    }
}

fn draw_dots(ctx: &mut vello_cpu::RenderContext, scene: &Scene) {
    for dot in scene.motion().dots() {
        let picked = scene.dot_in_any_shape(dot.id);
        let path = Circle::new(dot.position, DOT_RADIUS).to_path(CURVE_TOLERANCE);
        fill(ctx, &path, if picked { DOT_PICKED } else { DOT_FILL });
        stroke(ctx, &path, if picked { DOT_PICKED } else { DOT_STROKE }, 1.0);
    }
}

/// Polygon through the *current* positions of the member dots; shapes deform
/// as the dots move. Skipped when any index is stale or too few points remain.
fn draw_polygon(ctx: &mut vello_cpu::RenderContext, scene: &Scene, indices: &[usize], color: Rgba8) {
    let dots = scene.motion().dots();
    let mut points = Vec::with_capacity(indices.len());
    for &id in indices {
        let Some(dot) = dots.get(id) else { return };
        points.push(dot.position);
    }
    if points.len() < 2 {
        return;
    }

    let mut path = BezPath::new();
    path.move_to(points[0]);
    for &p in &points[1..] {
        path.line_to(p);
    }
    path.close_path();

    fill(ctx, &path, color.with_alpha(SHAPE_FILL_ALPHA));
    stroke(ctx, &path, color.with_alpha(SHAPE_STROKE_ALPHA), 1.5);
}

fn fill(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&bezpath_to_cpu(path));
}

fn stroke(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Rgba8, width: f64) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
    ctx.stroke_path(&bezpath_to_cpu(path));
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::model::SceneConfig;

    #[test]
    fn frame_has_expected_dimensions() {
        let scene = Scene::new(SceneConfig::default()).unwrap();
        let frame = render_scene(&scene, &RenderSettings::default()).unwrap();
        assert_eq!(frame.width, 400);
        assert_eq!(frame.height, 400);
        assert_eq!(frame.data.len(), 400 * 400 * 4);
    }

    #[test]
    fn scale_multiplies_dimensions() {
        let scene = Scene::new(SceneConfig::default()).unwrap();
        let frame = render_scene(
            &scene,
            &RenderSettings {
                scale: 2,
                ..RenderSettings::default()
            },
        )
        .unwrap();
        assert_eq!(frame.width, 800);
        assert_eq!(frame.height, 800);
    }

    #[test]
    fn zero_scale_is_rejected() {
        let scene = Scene::new(SceneConfig::default()).unwrap();
        let settings = RenderSettings {
            scale: 0,
            ..RenderSettings::default()
        };
        assert!(render_scene(&scene, &settings).is_err());
    }

    #[test]
    fn oversized_scale_is_rejected() {
        let scene = Scene::new(SceneConfig::default()).unwrap();
        let settings = RenderSettings {
            scale: 1000,
            ..RenderSettings::default()
        };
        assert!(render_scene(&scene, &settings).is_err());
    }

    #[test]
    fn frame_is_not_all_background() {
        let scene = Scene::new(SceneConfig::default()).unwrap();
        let frame = render_scene(&scene, &RenderSettings::default()).unwrap();
        let bg = Rgba8::opaque(255, 255, 255).to_premul();
        let touched = frame.data.chunks_exact(4).any(|px| px != bg.as_slice());
        assert!(touched, "rendering should draw something over the background");
    }
}
