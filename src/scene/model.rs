use crate::{
    figure::{
        sampler::PathSampler,
        star::{FigureConfig, StarFigure},
    },
    foundation::error::StarpathResult,
    motion::driver::{Motion, MotionParams},
    scene::picker::{ClickOutcome, ShapePicker},
};

pub const MIN_DOT_COUNT: usize = 1;
pub const MAX_DOT_COUNT: usize = 50;

/// Fixed overlay polygons recovered from the original visualization. The
/// indices assume at least 12 dots; groups with stale indices are skipped.
pub const TRIANGLE_GROUPS: [[usize; 3]; 4] = [[0, 4, 8], [1, 5, 9], [2, 6, 10], [3, 7, 11]];
pub const RECTANGLE_GROUPS: [[usize; 4]; 3] = [[0, 3, 6, 9], [1, 4, 7, 10], [2, 5, 8, 11]];

/// Everything the UI can set, serializable as a scene JSON file.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub figure: FigureConfig,
    pub dot_count: usize,
    pub motion: MotionParams,
    pub show_outline: bool,
    pub show_triangles: bool,
    pub show_rectangles: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            dot_count: 12,
            motion: MotionParams::default(),
            show_outline: false,
            show_triangles: false,
            show_rectangles: false,
        }
    }
}

/// The complete animation state: configuration plus the derived geometry,
/// tracked dots, and shape bookkeeping.
///
/// Updates are pull-based: mutators change the config and then explicitly
/// recompute whatever derives from it; nothing re-renders implicitly. Frame
/// advancement takes the elapsed time and reads the current parameter values
/// from the config, so there is no captured mutable state anywhere.
#[derive(Clone, Debug)]
pub struct Scene {
    config: SceneConfig,
    figure: StarFigure,
    sampler: Option<PathSampler>,
    motion: Motion,
    picker: ShapePicker,
}

impl Scene {
    pub fn new(mut config: SceneConfig) -> StarpathResult<Self> {
        config.dot_count = config.dot_count.clamp(MIN_DOT_COUNT, MAX_DOT_COUNT);
        config.motion = config.motion.clamped();

        let figure = StarFigure::new(config.figure)?;
        let sampler = PathSampler::for_figure(&figure);
        let mut motion = Motion::default();
        motion.reseed(config.dot_count, sampler.as_ref(), config.motion.deceleration);

        Ok(Self {
            config,
            figure,
            sampler,
            motion,
            picker: ShapePicker::default(),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn figure(&self) -> &StarFigure {
        &self.figure
    }

    pub fn sampler(&self) -> Option<&PathSampler> {
        self.sampler.as_ref()
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn picker(&self) -> &ShapePicker {
        &self.picker
    }

    pub fn is_animating(&self) -> bool {
        self.config.motion.is_animating()
    }

    /// Advance the animation by `dt_secs` of wall-clock time.
    pub fn tick(&mut self, dt_secs: f64) {
        self.motion
            .advance(dt_secs, self.config.motion, self.sampler.as_ref());
    }

    /// Change the number of tracked dots. Every dot's path time is reset to
    /// even spacing and all user shapes are discarded (their indices would
    /// otherwise dangle).
    pub fn set_dot_count(&mut self, count: usize) {
        let count = count.clamp(MIN_DOT_COUNT, MAX_DOT_COUNT);
        self.config.dot_count = count;
        self.motion
            .reseed(count, self.sampler.as_ref(), self.config.motion.deceleration);
        self.picker.clear();
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.config.motion = MotionParams {
            speed,
            ..self.config.motion
        }
        .clamped();
    }

    pub fn set_deceleration(&mut self, deceleration: f64) {
        self.config.motion = MotionParams {
            deceleration,
            ..self.config.motion
        }
        .clamped();
    }

    pub fn set_rotation_rate(&mut self, rotation_rate: f64) {
        self.config.motion = MotionParams {
            rotation_rate,
            ..self.config.motion
        }
        .clamped();
    }

    pub fn set_show_outline(&mut self, show: bool) {
        self.config.show_outline = show;
    }

    pub fn set_show_triangles(&mut self, show: bool) {
        self.config.show_triangles = show;
    }

    pub fn set_show_rectangles(&mut self, show: bool) {
        self.config.show_rectangles = show;
    }

    /// Forward a click on dot `id` to the picker. Stale ids are ignored.
    pub fn click_dot(&mut self, id: usize) -> Option<ClickOutcome> {
        if id >= self.motion.dot_count() {
            return None;
        }
        Some(self.picker.click_dot(id))
    }

    pub fn click_background(&mut self) -> ClickOutcome {
        self.picker.click_background()
    }

    /// Whether the dot belongs to any user shape or visible overlay group
    /// (highlighted when rendered).
    pub fn dot_in_any_shape(&self, id: usize) -> bool {
        if self.picker.contains_dot(id) {
            return true;
        }
        let n = self.motion.dot_count();
        (self.config.show_triangles
            && visible_groups(&TRIANGLE_GROUPS, n).any(|g| g.contains(&id)))
            || (self.config.show_rectangles
                && visible_groups(&RECTANGLE_GROUPS, n).any(|g| g.contains(&id)))
    }
}

/// Overlay groups whose indices are all live for the given dot count.
pub fn visible_groups<'a, const K: usize>(
    groups: &'a [[usize; K]],
    dot_count: usize,
) -> impl Iterator<Item = &'a [usize; K]> {
    groups
        .iter()
        .filter(move |group| group.iter().all(|&i| i < dot_count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_matches_the_original_initial_state() {
        let scene = Scene::new(SceneConfig::default()).unwrap();
        assert_eq!(scene.motion().dot_count(), 12);
        assert_eq!(scene.config().motion.speed, 0.2);
        assert_eq!(scene.config().motion.deceleration, 1.0);
        assert_eq!(scene.config().motion.rotation_rate, 10.0);
        assert!(scene.is_animating());
    }

    #[test]
    fn dot_count_change_reseeds_and_clears_shapes() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        for id in [1, 4, 7] {
            scene.click_dot(id);
        }
        scene.click_background();
        assert_eq!(scene.picker().completed().len(), 1);

        scene.set_dot_count(5);
        assert!(scene.picker().completed().is_empty());
        assert!(scene.picker().current().is_empty());
        let times: Vec<f64> = scene.motion().dots().iter().map(|d| d.path_time).collect();
        assert_eq!(times, vec![0.0, 0.2, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn dot_count_is_clamped_to_bounds() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        scene.set_dot_count(0);
        assert_eq!(scene.motion().dot_count(), MIN_DOT_COUNT);
        scene.set_dot_count(500);
        assert_eq!(scene.motion().dot_count(), MAX_DOT_COUNT);
    }

    #[test]
    fn stale_dot_clicks_are_ignored() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        assert!(scene.click_dot(99).is_none());
        assert!(scene.click_dot(3).is_some());
    }

    #[test]
    fn overlay_groups_hide_when_indices_go_stale() {
        let mut scene = Scene::new(SceneConfig::default()).unwrap();
        scene.set_show_triangles(true);
        assert!(scene.dot_in_any_shape(11));

        scene.set_dot_count(6);
        // Every triangle group references an index >= 6, so all of them hide.
        assert_eq!(visible_groups(&TRIANGLE_GROUPS, 6).count(), 0);
        assert!(!scene.dot_in_any_shape(1));
    }

    #[test]
    fn ticking_with_zero_rates_changes_nothing() {
        let mut scene = Scene::new(SceneConfig {
            motion: MotionParams {
                speed: 0.0,
                deceleration: 1.0,
                rotation_rate: 0.0,
            },
            ..SceneConfig::default()
        })
        .unwrap();
        assert!(!scene.is_animating());
        let before = scene.motion().dots().to_vec();
        scene.tick(2.0);
        assert_eq!(scene.motion().dots(), &before[..]);
        assert_eq!(scene.motion().rotation_deg(), 0.0);
    }

    #[test]
    fn degenerate_figure_yields_an_empty_scene() {
        let scene = Scene::new(SceneConfig {
            figure: FigureConfig {
                vertex_count: 6,
                step: 3,
                ..FigureConfig::default()
            },
            ..SceneConfig::default()
        })
        .unwrap();
        assert!(scene.sampler().is_none());
        assert_eq!(scene.motion().dot_count(), 0);
    }

    #[test]
    fn scene_config_json_roundtrip() {
        let config = SceneConfig {
            dot_count: 24,
            show_outline: true,
            ..SceneConfig::default()
        };
        let s = serde_json::to_string_pretty(&config).unwrap();
        let de: SceneConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(de, config);
    }
}
