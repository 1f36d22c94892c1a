//! Starpath renders an interactive geometric animation: dots travelling
//! around a star polygon (by default a {7/3} heptagram) inscribed in a circle,
//! with adjustable speed, per-segment easing, display rotation, and
//! user-drawn polygon overlays connecting the dots.
//!
//! # Pipeline overview
//!
//! 1. **Build**: [`FigureConfig`] -> [`StarFigure`] (vertices, star order,
//!    segment metrics) -> [`PathSampler`]
//! 2. **Sample**: normalized path time + deceleration -> [`PathSample`]
//!    (position on the closed path), a pure function
//! 3. **Advance**: [`Scene::tick`] moves every dot's path time and the display
//!    rotation by the elapsed wall-clock seconds
//! 4. **Render**: [`render_scene`] rasterizes the scene into a premultiplied
//!    RGBA8 [`FrameRgba`] via the CPU backend
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pull-based state**: there is no reactive layer; mutators update the
//!   [`Scene`] and explicitly recompute what derives from it.
//! - **Explicit time**: frame updates receive elapsed seconds and the current
//!   parameter values as arguments; nothing captures mutable outer state.
//! - **Clamp, don't fail**: UI-range inputs are clamped defensively; errors
//!   are reserved for genuinely invalid configuration.
//!
//! For a walkthrough of the concepts, see [`crate::guide`].
#![forbid(unsafe_code)]

mod anim;
mod figure;
mod foundation;
mod motion;
mod render;
mod scene;

/// High-level, standalone documentation for Starpath's concepts.
pub mod guide;

pub use anim::ease;
pub use figure::sampler::{PathSample, PathSampler};
pub use figure::star::{FigureConfig, StarFigure};
pub use foundation::core::{Affine, BezPath, Circle, Point, Rgba8, Vec2, Viewport};
pub use foundation::error::{StarpathError, StarpathResult};
pub use motion::driver::{Dot, MAX_ROTATION_RATE, MAX_SPEED, Motion, MotionParams, SPEED_SCALE};
pub use render::cpu::{FrameRgba, RenderSettings, render_scene};
pub use scene::model::{
    MAX_DOT_COUNT, MIN_DOT_COUNT, RECTANGLE_GROUPS, Scene, SceneConfig, TRIANGLE_GROUPS,
    visible_groups,
};
pub use scene::picker::{ClickOutcome, MIN_SHAPE_POINTS, ShapePicker};
