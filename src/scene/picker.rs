/// Minimum number of picked dots for a shape to be committable.
pub const MIN_SHAPE_POINTS: usize = 3;

/// What a click did to the picker state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Dot appended to the in-progress shape.
    Added,
    /// Most-recently-added dot clicked again and removed.
    RemovedLast,
    /// In-progress shape finalized; a fresh one was started.
    Finalized,
    /// Background click with too few points; in-progress shape discarded.
    Discarded,
}

/// Bookkeeping for user-drawn polygons: one mutable in-progress shape and a
/// list of finalized shapes. Finalized shapes are immutable; they are drawn at
/// the dots' *current* positions, so they deform as the dots move.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ShapePicker {
    current: Vec<usize>,
    completed: Vec<Vec<usize>>,
}

impl ShapePicker {
    /// In-progress shape, in pick order.
    pub fn current(&self) -> &[usize] {
        &self.current
    }

    pub fn completed(&self) -> &[Vec<usize>] {
        &self.completed
    }

    /// Apply a click on dot `id`.
    ///
    /// Clicking the last-added dot undoes it; clicking a dot already present
    /// earlier finalizes the shape once it has at least [`MIN_SHAPE_POINTS`];
    /// anything else appends.
    pub fn click_dot(&mut self, id: usize) -> ClickOutcome {
        if self.current.last() == Some(&id) {
            self.current.pop();
            return ClickOutcome::RemovedLast;
        }

        if self.current.contains(&id) && self.current.len() >= MIN_SHAPE_POINTS {
            self.completed.push(std::mem::take(&mut self.current));
            return ClickOutcome::Finalized;
        }

        self.current.push(id);
        ClickOutcome::Added
    }

    /// Apply a click on empty canvas space: finalize the in-progress shape if
    /// it is large enough, then start fresh either way.
    pub fn click_background(&mut self) -> ClickOutcome {
        if self.current.len() >= MIN_SHAPE_POINTS {
            self.completed.push(std::mem::take(&mut self.current));
            ClickOutcome::Finalized
        } else {
            self.current.clear();
            ClickOutcome::Discarded
        }
    }

    /// Drop everything. Used when the dot count changes and every stored index
    /// would dangle.
    pub fn clear(&mut self) {
        self.current.clear();
        self.completed.clear();
    }

    pub fn contains_dot(&self, id: usize) -> bool {
        self.current.contains(&id) || self.completed.iter().any(|shape| shape.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_dots_builds_the_current_shape() {
        let mut picker = ShapePicker::default();
        assert_eq!(picker.click_dot(2), ClickOutcome::Added);
        assert_eq!(picker.click_dot(5), ClickOutcome::Added);
        assert_eq!(picker.current(), &[2, 5]);
    }

    #[test]
    fn clicking_last_dot_again_undoes_it() {
        let mut picker = ShapePicker::default();
        picker.click_dot(2);
        picker.click_dot(5);
        assert_eq!(picker.click_dot(5), ClickOutcome::RemovedLast);
        assert_eq!(picker.current(), &[2]);
    }

    #[test]
    fn revisiting_an_earlier_dot_finalizes_with_three_points() {
        let mut picker = ShapePicker::default();
        for id in [1, 4, 7] {
            picker.click_dot(id);
        }
        assert_eq!(picker.click_dot(1), ClickOutcome::Finalized);
        assert_eq!(picker.completed(), &[vec![1, 4, 7]]);
        assert!(picker.current().is_empty());
    }

    #[test]
    fn revisiting_with_two_points_appends_instead() {
        // Matches the original behavior: the close-the-loop gesture only kicks
        // in once a polygon is possible.
        let mut picker = ShapePicker::default();
        picker.click_dot(1);
        picker.click_dot(4);
        assert_eq!(picker.click_dot(1), ClickOutcome::Added);
        assert_eq!(picker.current(), &[1, 4, 1]);
    }

    #[test]
    fn background_click_finalizes_large_shapes() {
        let mut picker = ShapePicker::default();
        for id in [0, 3, 6, 9] {
            picker.click_dot(id);
        }
        assert_eq!(picker.click_background(), ClickOutcome::Finalized);
        assert_eq!(picker.completed().len(), 1);
        assert!(picker.current().is_empty());
    }

    #[test]
    fn background_click_discards_small_shapes() {
        let mut picker = ShapePicker::default();
        picker.click_dot(0);
        picker.click_dot(3);
        assert_eq!(picker.click_background(), ClickOutcome::Discarded);
        assert!(picker.current().is_empty());
        assert!(picker.completed().is_empty());
    }

    #[test]
    fn clear_drops_current_and_completed() {
        let mut picker = ShapePicker::default();
        for id in [1, 4, 7] {
            picker.click_dot(id);
        }
        picker.click_background();
        picker.click_dot(2);
        picker.clear();
        assert!(picker.current().is_empty());
        assert!(picker.completed().is_empty());
    }

    #[test]
    fn contains_dot_checks_both_stores() {
        let mut picker = ShapePicker::default();
        for id in [1, 4, 7] {
            picker.click_dot(id);
        }
        picker.click_background();
        picker.click_dot(9);
        assert!(picker.contains_dot(4));
        assert!(picker.contains_dot(9));
        assert!(!picker.contains_dot(2));
    }
}
