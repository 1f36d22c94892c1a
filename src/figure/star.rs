use std::f64::consts::PI;

use crate::foundation::{
    core::{BezPath, Point, gcd},
    error::{StarpathError, StarpathResult},
};

/// Circle and star-polygon parameters for the figure.
///
/// Defaults reproduce the original visualization: a {7/3} heptagram inscribed
/// in a radius-180 circle centered in a 400x400 viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FigureConfig {
    pub center: Point,
    pub radius: f64,
    pub vertex_count: u32,
    /// Star-polygon step: the path connects every `step`-th vertex ({N/step}).
    pub step: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            center: Point::new(200.0, 200.0),
            radius: 180.0,
            vertex_count: 7,
            step: 3,
        }
    }
}

impl FigureConfig {
    pub fn validate(&self) -> StarpathResult<()> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(StarpathError::validation("figure center must be finite"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(StarpathError::validation(
                "figure radius must be finite and > 0",
            ));
        }
        if self.vertex_count == 0 {
            return Err(StarpathError::validation("vertex_count must be > 0"));
        }
        if self.step == 0 {
            return Err(StarpathError::validation("step must be > 0"));
        }
        Ok(())
    }

    /// A {N/step} cycle visits every vertex exactly once iff N and step are
    /// coprime; at least 3 vertices are needed for a drawable closed path.
    pub fn has_star_path(&self) -> bool {
        self.vertex_count >= 3 && gcd(self.vertex_count, self.step % self.vertex_count.max(1)) == 1
    }
}

/// Precomputed geometry of the star figure: the polygon vertices, the star
/// visiting order, and the per-segment metrics of the closed path.
///
/// Pure function of the config; rebuild it only when the config changes.
#[derive(Clone, Debug)]
pub struct StarFigure {
    config: FigureConfig,
    vertices: Vec<Point>,
    order: Vec<usize>,
    path: Vec<Point>,
    segment_lengths: Vec<f64>,
    total_length: f64,
}

impl StarFigure {
    pub fn new(config: FigureConfig) -> StarpathResult<Self> {
        config.validate()?;

        let n = config.vertex_count as usize;
        let mut vertices = Vec::with_capacity(n);
        for i in 0..n {
            // First vertex points straight up.
            let angle = (i as f64) * 2.0 * PI / (n as f64) - PI / 2.0;
            vertices.push(Point::new(
                config.center.x + config.radius * angle.cos(),
                config.center.y + config.radius * angle.sin(),
            ));
        }

        let order = if config.has_star_path() {
            star_order(config.vertex_count, config.step)
        } else {
            Vec::new()
        };
        let path: Vec<Point> = order.iter().map(|&i| vertices[i]).collect();

        let mut segment_lengths = Vec::with_capacity(path.len());
        let mut total_length = 0.0;
        for (i, &p) in path.iter().enumerate() {
            let next = path[(i + 1) % path.len()];
            let len = p.distance(next);
            segment_lengths.push(len);
            total_length += len;
        }

        Ok(Self {
            config,
            vertices,
            order,
            path,
            segment_lengths,
            total_length,
        })
    }

    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    /// Polygon vertices in angular order, first vertex at the top.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Star visiting order (empty for degenerate configs).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Vertices reordered along the star path.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Euclidean length of each path segment, including the closing edge.
    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Closed outline of the star path, or `None` for degenerate configs.
    pub fn outline(&self) -> Option<BezPath> {
        let (&first, rest) = self.path.split_first()?;
        let mut bez = BezPath::new();
        bez.move_to(first);
        for &p in rest {
            bez.line_to(p);
        }
        bez.close_path();
        Some(bez)
    }
}

fn star_order(n: u32, step: u32) -> Vec<usize> {
    let mut order = Vec::with_capacity(n as usize);
    let mut current = 0u32;
    for _ in 0..n {
        order.push(current as usize);
        current = (current + step) % n;
    }
    order
}
