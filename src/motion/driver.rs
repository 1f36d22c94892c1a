use crate::{
    figure::sampler::PathSampler,
    foundation::core::Point,
};

/// Raw speed settings are in `[0, 1]`; this factor brings them down to a
/// comfortable cycles-per-second range (carried over from the original).
pub const SPEED_SCALE: f64 = 0.1;

pub const MAX_SPEED: f64 = 1.0;
pub const MAX_ROTATION_RATE: f64 = 20.0;

/// Frame-to-frame animation rates. Callers pass the current values into every
/// [`Motion::advance`] call; the driver holds no copy of them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MotionParams {
    /// Path-traversal speed in `[0, 1]`; 0 freezes all dots.
    pub speed: f64,
    /// Per-segment easing knob in `[-1, 1]`.
    pub deceleration: f64,
    /// Display rotation in degrees per second, `[-20, 20]`.
    pub rotation_rate: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            speed: 0.2,
            deceleration: 1.0,
            rotation_rate: 10.0,
        }
    }
}

impl MotionParams {
    /// UI ranges are enforced here rather than signalled as errors.
    pub fn clamped(self) -> Self {
        Self {
            speed: finite_or_zero(self.speed).clamp(0.0, MAX_SPEED),
            deceleration: finite_or_zero(self.deceleration).clamp(-1.0, 1.0),
            rotation_rate: finite_or_zero(self.rotation_rate)
                .clamp(-MAX_ROTATION_RATE, MAX_ROTATION_RATE),
        }
    }

    /// False only when both continuous processes are stopped; the embedding UI
    /// may stop scheduling frames then.
    pub fn is_animating(self) -> bool {
        let p = self.clamped();
        p.speed > 0.0 || p.rotation_rate != 0.0
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// One tracked point on the path. Position and distance are derived from
/// `path_time` on every update, never advanced independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub id: usize,
    pub path_time: f64,
    pub position: Point,
    pub distance: f64,
}

/// Two independent continuous processes, advanced once per rendering frame by
/// the elapsed wall-clock seconds: dot translation along the path, and a rigid
/// display rotation of the whole figure.
#[derive(Clone, Debug, Default)]
pub struct Motion {
    dots: Vec<Dot>,
    rotation_deg: f64,
}

impl Motion {
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    /// Accumulated display rotation in degrees, in `[0, 360)`.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// Re-parameterize to `count` dots spaced evenly in path time. The caller
    /// is responsible for discarding user shapes whose indices would dangle.
    pub fn reseed(&mut self, count: usize, sampler: Option<&PathSampler>, deceleration: f64) {
        self.dots.clear();
        let Some(sampler) = sampler else { return };
        self.dots.reserve(count);
        for id in 0..count {
            let path_time = id as f64 / count as f64;
            let sample = sampler.point_at_time(path_time, deceleration);
            self.dots.push(Dot {
                id,
                path_time,
                position: sample.position,
                distance: sample.distance,
            });
        }
    }

    /// Advance both processes by `dt_secs` of wall-clock time.
    #[tracing::instrument(level = "trace", skip(self, sampler))]
    pub fn advance(&mut self, dt_secs: f64, params: MotionParams, sampler: Option<&PathSampler>) {
        if !dt_secs.is_finite() || dt_secs < 0.0 {
            return;
        }
        let params = params.clamped();

        if params.speed > 0.0
            && let Some(sampler) = sampler
        {
            let increment = dt_secs * params.speed * SPEED_SCALE;
            for dot in &mut self.dots {
                dot.path_time = (dot.path_time + increment).rem_euclid(1.0);
                let sample = sampler.point_at_time(dot.path_time, params.deceleration);
                dot.position = sample.position;
                dot.distance = sample.distance;
            }
        }

        if params.rotation_rate != 0.0 {
            self.rotation_deg = (self.rotation_deg + dt_secs * params.rotation_rate).rem_euclid(360.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::star::{FigureConfig, StarFigure};

    fn sampler() -> PathSampler {
        let figure = StarFigure::new(FigureConfig::default()).unwrap();
        PathSampler::for_figure(&figure).unwrap()
    }

    #[test]
    fn reseed_spaces_dots_evenly() {
        let s = sampler();
        let mut motion = Motion::default();
        motion.reseed(5, Some(&s), 0.0);
        let times: Vec<f64> = motion.dots().iter().map(|d| d.path_time).collect();
        assert_eq!(times, vec![0.0, 0.2, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn zero_speed_freezes_dots() {
        let s = sampler();
        let mut motion = Motion::default();
        motion.reseed(3, Some(&s), 0.0);
        let before = motion.dots().to_vec();
        motion.advance(
            1.5,
            MotionParams {
                speed: 0.0,
                deceleration: 0.0,
                rotation_rate: 10.0,
            },
            Some(&s),
        );
        assert_eq!(motion.dots(), &before[..]);
        assert!(motion.rotation_deg() > 0.0);
    }

    #[test]
    fn translation_advances_and_wraps_path_time() {
        let s = sampler();
        let mut motion = Motion::default();
        motion.reseed(1, Some(&s), 0.0);
        let params = MotionParams {
            speed: 1.0,
            deceleration: 0.0,
            rotation_rate: 0.0,
        };
        // speed 1.0 * SPEED_SCALE = 0.1 cycles/sec; 12 seconds = 1.2 cycles.
        motion.advance(12.0, params, Some(&s));
        assert!((motion.dots()[0].path_time - 0.2).abs() < 1e-9);
    }

    #[test]
    fn rotation_accumulation_is_frame_granularity_independent() {
        let s = sampler();
        let params = MotionParams {
            speed: 0.0,
            deceleration: 0.0,
            rotation_rate: 17.0,
        };

        let mut coarse = Motion::default();
        coarse.advance(45.0, params, Some(&s));

        let mut fine = Motion::default();
        let mut remaining = 45.0f64;
        while remaining > 0.0 {
            let step = remaining.min(0.013);
            fine.advance(step, params, Some(&s));
            remaining -= step;
        }
        assert!((coarse.rotation_deg() - (17.0 * 45.0f64).rem_euclid(360.0)).abs() < 1e-6);
        assert!((coarse.rotation_deg() - fine.rotation_deg()).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_params_are_clamped() {
        let p = MotionParams {
            speed: 3.0,
            deceleration: -9.0,
            rotation_rate: 500.0,
        }
        .clamped();
        assert_eq!(p.speed, 1.0);
        assert_eq!(p.deceleration, -1.0);
        assert_eq!(p.rotation_rate, 20.0);
    }

    #[test]
    fn is_animating_tracks_both_rates() {
        let stopped = MotionParams {
            speed: 0.0,
            deceleration: 1.0,
            rotation_rate: 0.0,
        };
        assert!(!stopped.is_animating());
        assert!(MotionParams { speed: 0.1, ..stopped }.is_animating());
        assert!(
            MotionParams {
                rotation_rate: -3.0,
                ..stopped
            }
            .is_animating()
        );
    }

    #[test]
    fn reseed_without_sampler_leaves_no_dots() {
        let mut motion = Motion::default();
        motion.reseed(10, None, 0.0);
        assert_eq!(motion.dot_count(), 0);
    }
}
