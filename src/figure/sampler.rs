use crate::{anim::ease, figure::star::StarFigure, foundation::core::Point};

/// Result of sampling the closed star path at one normalized time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    /// Interpolated position on the path.
    pub position: Point,
    /// Index of the segment the sample falls in.
    pub segment: usize,
    /// Eased local fraction within the segment.
    pub eased: f64,
    /// Un-eased local fraction within the segment.
    pub linear: f64,
    /// Input time normalized into `[0, 1)`.
    pub path_time: f64,
    /// Cumulative distance travelled along the path. Informational only; it is
    /// derived from the eased fraction and never drives motion.
    pub distance: f64,
}

/// Maps normalized path time to a position on the closed star path.
///
/// Every segment owns an equal `1/N` share of the time domain regardless of
/// its geometric length, so apparent speed varies across unequal segments.
/// Sampling is a pure function of `(time, deceleration)`.
#[derive(Clone, Debug)]
pub struct PathSampler {
    points: Vec<Point>,
    segment_lengths: Vec<f64>,
}

impl PathSampler {
    /// Build a sampler for a figure's star path. `None` when the figure has no
    /// path geometry (degenerate config).
    pub fn for_figure(figure: &StarFigure) -> Option<Self> {
        if !figure.has_path() {
            return None;
        }
        Some(Self {
            points: figure.path().to_vec(),
            segment_lengths: figure.segment_lengths().to_vec(),
        })
    }

    pub fn segment_count(&self) -> usize {
        self.points.len()
    }

    /// Sample the path at global time `time`, wrapped into `[0, 1)`.
    pub fn point_at_time(&self, time: f64, deceleration: f64) -> PathSample {
        let path_time = wrap_unit(time);
        let n = self.points.len();

        let scaled = path_time * n as f64;
        let segment = (scaled.floor() as usize).min(n - 1);
        let linear = scaled - segment as f64;
        let eased = ease::apply(linear, deceleration);

        let start = self.points[segment];
        let end = self.points[(segment + 1) % n];
        let position = Point::new(
            start.x + eased * (end.x - start.x),
            start.y + eased * (end.y - start.y),
        );

        let mut distance: f64 = self.segment_lengths[..segment].iter().sum();
        distance += eased * self.segment_lengths[segment];

        PathSample {
            position,
            segment,
            eased,
            linear,
            path_time,
            distance,
        }
    }
}

fn wrap_unit(t: f64) -> f64 {
    let wrapped = t.rem_euclid(1.0);
    // rem_euclid can return 1.0 for tiny negative inputs.
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
