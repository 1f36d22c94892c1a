//! # Starpath guide
//!
//! This module is a standalone walkthrough of Starpath's concepts. If you are
//! looking for copy/paste commands, start with the repository `README.md`; if
//! you are extending the crate, start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`FigureConfig`](crate::FigureConfig): circle center/radius plus the
//!   {N/step} star-polygon parameters (default {7/3}, the heptagram)
//! - [`StarFigure`](crate::StarFigure): derived geometry — vertices, the star
//!   visiting order, per-segment lengths, and the closed outline
//! - [`PathSampler`](crate::PathSampler): maps a normalized path time in
//!   `[0, 1)` to a point on the closed path
//! - [`Scene`](crate::Scene): the explicit state object — config, figure,
//!   tracked dots, shape picker
//! - [`FrameRgba`](crate::FrameRgba): rasterized output (premultiplied RGBA8)
//!
//! ## Path time, not arc length
//!
//! Each of the N path segments owns an equal `1/N` share of the time domain,
//! regardless of its geometric length. A dot's state is *only* its path time;
//! position and cumulative distance are recomputed from it on every update.
//! That makes sampling a pure function and keeps dots from drifting when the
//! animation pauses.
//!
//! Within a segment, the local fraction is remapped by
//! [`ease::apply`](crate::ease::apply): a sine S-curve blend controlled by a
//! single `deceleration` knob in `[-1, 1]`. Positive values make dots linger
//! at vertices, negative values make them rush through. For every knob value
//! the segment endpoints map exactly onto vertices.
//!
//! ## The frame loop contract
//!
//! The embedding UI owns the clock. Once per displayed frame it calls
//! [`Scene::tick`](crate::Scene::tick) with the elapsed wall-clock seconds;
//! translation and rotation advance independently from the current parameter
//! values. When [`Scene::is_animating`](crate::Scene::is_animating) is false
//! the UI may stop scheduling frames entirely — ticking with any `dt` is
//! still valid and changes nothing.
//!
//! Input events (dot clicks, background clicks) are applied between ticks on
//! the same thread; there is no interior mutability and no concurrency.
//!
//! ## Degenerate figures
//!
//! A config whose `vertex_count` and `step` are not coprime (or with fewer
//! than 3 vertices) has no star path. The figure still exposes its vertices,
//! but there is no sampler and the scene tracks no dots. This is deliberate
//! graceful degradation, not an error.
