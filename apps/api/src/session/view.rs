// What a session currently shows: the goal input form, or a generated
// roadmap with its check-off state.

use std::collections::HashMap;

use crate::generation::advice::GenerateAdviceOutput;
use crate::models::roadmap::{ItemKind, Roadmap, RoadmapProgressData};

#[derive(Debug, Clone, Default)]
pub enum RoadmapView {
    #[default]
    Form,
    Display(DisplayState),
}

/// The roadmap being worked on, plus everything needed to persist it.
/// `advice_cache` is per-view only: it never survives a regeneration, a
/// resume, or a reset, and is never written to the store.
#[derive(Debug, Clone)]
pub struct DisplayState {
    pub roadmap: Roadmap,
    pub goal: String,
    pub current_skills: String,
    pub checked_items: HashMap<String, bool>,
    advice_cache: HashMap<usize, GenerateAdviceOutput>,
}

impl RoadmapView {
    /// Switches to display mode with a fresh advice cache.
    pub fn enter_display(
        &mut self,
        roadmap: Roadmap,
        goal: String,
        current_skills: String,
        checked_items: HashMap<String, bool>,
    ) {
        *self = RoadmapView::Display(DisplayState {
            roadmap,
            goal,
            current_skills,
            checked_items,
            advice_cache: HashMap::new(),
        });
    }

    /// Discards the current roadmap and returns to the input form.
    pub fn reset(&mut self) {
        *self = RoadmapView::Form;
    }

    pub fn display(&self) -> Option<&DisplayState> {
        match self {
            RoadmapView::Display(state) => Some(state),
            RoadmapView::Form => None,
        }
    }

    pub fn display_mut(&mut self) -> Option<&mut DisplayState> {
        match self {
            RoadmapView::Display(state) => Some(state),
            RoadmapView::Form => None,
        }
    }

    /// Clones the displayed roadmap into the document shape the store persists.
    pub fn snapshot(&self) -> Option<RoadmapProgressData> {
        self.display().map(|state| RoadmapProgressData {
            roadmap: state.roadmap.clone(),
            checked_items: state.checked_items.clone(),
            goal: state.goal.clone(),
            current_skills: state.current_skills.clone(),
        })
    }
}

impl DisplayState {
    /// Records a checkbox state. Unchecking keeps the key with `false` rather
    /// than removing it, matching the stored document shape.
    pub fn set_checked(&mut self, item_id: String, checked: bool) {
        self.checked_items.insert(item_id, checked);
    }

    /// Whether the given (kind, step, index) triple points at a real item in
    /// the displayed roadmap.
    pub fn contains_item(&self, kind: ItemKind, step_index: usize, item_index: usize) -> bool {
        let Some(step) = self.roadmap.get(step_index) else {
            return false;
        };
        match kind {
            ItemKind::Task => item_index < step.sub_tasks.len(),
            ItemKind::Resource => item_index < step.resources.len(),
        }
    }

    pub fn cached_advice(&self, step_index: usize) -> Option<&GenerateAdviceOutput> {
        self.advice_cache.get(&step_index)
    }

    pub fn cache_advice(&mut self, step_index: usize, advice: GenerateAdviceOutput) {
        self.advice_cache.insert(step_index, advice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::roadmap::{Resource, RoadmapStep, StepIcon, SubTask};

    fn sample_roadmap() -> Roadmap {
        vec![RoadmapStep {
            title: "Master the Fundamentals".to_string(),
            duration: "2 Weeks".to_string(),
            description: "Build a solid base.".to_string(),
            icon: StepIcon::BookOpen,
            sub_tasks: vec![
                SubTask {
                    title: "Read the intro chapter".to_string(),
                },
                SubTask {
                    title: "Do the exercises".to_string(),
                },
            ],
            focus_techniques: vec!["Timebox research to 1 hour".to_string()],
            resources: vec![Resource {
                title: "Official docs".to_string(),
                url: "https://example.com/docs".to_string(),
            }],
        }]
    }

    fn sample_advice() -> GenerateAdviceOutput {
        GenerateAdviceOutput {
            advice: "Start small.".to_string(),
            focus_techniques: vec!["Pomodoro".to_string()],
        }
    }

    #[test]
    fn test_default_view_is_form() {
        let view = RoadmapView::default();
        assert!(view.display().is_none());
        assert!(view.snapshot().is_none());
    }

    #[test]
    fn test_enter_display_seeds_checked_items() {
        let mut view = RoadmapView::default();
        let mut checks = HashMap::new();
        checks.insert("task-0-0".to_string(), true);

        view.enter_display(
            sample_roadmap(),
            "Learn Rust".to_string(),
            "Some C experience".to_string(),
            checks,
        );

        let state = view.display().unwrap();
        assert_eq!(state.checked_items.get("task-0-0"), Some(&true));
        assert!(state.cached_advice(0).is_none());
    }

    #[test]
    fn test_unchecking_keeps_key_as_false() {
        let mut view = RoadmapView::default();
        view.enter_display(
            sample_roadmap(),
            "Learn Rust".to_string(),
            String::new(),
            HashMap::new(),
        );

        let state = view.display_mut().unwrap();
        state.set_checked("task-0-1".to_string(), true);
        state.set_checked("task-0-1".to_string(), false);

        assert_eq!(state.checked_items.get("task-0-1"), Some(&false));
        assert_eq!(state.checked_items.len(), 1);
    }

    #[test]
    fn test_contains_item_bounds() {
        let mut view = RoadmapView::default();
        view.enter_display(
            sample_roadmap(),
            "Learn Rust".to_string(),
            String::new(),
            HashMap::new(),
        );
        let state = view.display().unwrap();

        assert!(state.contains_item(ItemKind::Task, 0, 1));
        assert!(!state.contains_item(ItemKind::Task, 0, 2));
        assert!(state.contains_item(ItemKind::Resource, 0, 0));
        assert!(!state.contains_item(ItemKind::Resource, 0, 1));
        assert!(!state.contains_item(ItemKind::Task, 1, 0));
    }

    #[test]
    fn test_snapshot_matches_display() {
        let mut view = RoadmapView::default();
        view.enter_display(
            sample_roadmap(),
            "Learn Rust".to_string(),
            "Some C experience".to_string(),
            HashMap::new(),
        );
        view.display_mut()
            .unwrap()
            .set_checked("resource-0-0".to_string(), true);

        let snapshot = view.snapshot().unwrap();
        assert_eq!(snapshot.goal, "Learn Rust");
        assert_eq!(snapshot.current_skills, "Some C experience");
        assert_eq!(snapshot.roadmap, sample_roadmap());
        assert_eq!(snapshot.checked_items.get("resource-0-0"), Some(&true));
    }

    #[test]
    fn test_reset_discards_display() {
        let mut view = RoadmapView::default();
        view.enter_display(
            sample_roadmap(),
            "Learn Rust".to_string(),
            String::new(),
            HashMap::new(),
        );
        view.reset();
        assert!(view.display().is_none());
    }

    #[test]
    fn test_regeneration_clears_advice_cache() {
        let mut view = RoadmapView::default();
        view.enter_display(
            sample_roadmap(),
            "Learn Rust".to_string(),
            String::new(),
            HashMap::new(),
        );
        view.display_mut().unwrap().cache_advice(0, sample_advice());
        assert!(view.display().unwrap().cached_advice(0).is_some());

        view.enter_display(
            sample_roadmap(),
            "Learn Go".to_string(),
            String::new(),
            HashMap::new(),
        );
        assert!(view.display().unwrap().cached_advice(0).is_none());
    }
}
