//! Roadmap document types — the stored per-user progress document and the
//! structured output of roadmap generation.
//!
//! Document types serialize with camelCase field names. That is the stored
//! JSON contract (`checkedItems`, `currentSkills`, `subTasks`, ...): existing
//! documents must round-trip unchanged.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Icon name attached to a roadmap step. Exactly these twelve names are
/// valid; anything else fails deserialization, which is how schema shape
/// is enforced on model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepIcon {
    BookOpen,
    Target,
    ListTodo,
    BrainCircuit,
    Layers,
    Palette,
    PenTool,
    Milestone,
    Flag,
    ClipboardCheck,
    TrendingUp,
    Rocket,
}

/// A single actionable sub-task within a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub title: String,
}

/// An online learning resource. The URL is model-provided and not validated
/// server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// One step of a generated roadmap. Produced entirely by the generation
/// call; never mutated afterwards, only regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub title: String,
    /// Free-form duration estimate (e.g. "2 Weeks", "1 Month").
    pub duration: String,
    pub description: String,
    pub icon: StepIcon,
    pub sub_tasks: Vec<SubTask>,
    pub focus_techniques: Vec<String>,
    pub resources: Vec<Resource>,
}

impl RoadmapStep {
    /// Number of checkable items in this step (sub-tasks + resources).
    pub fn checkable_items(&self) -> usize {
        self.sub_tasks.len() + self.resources.len()
    }
}

/// Ordered list of steps. Array order is display order and is significant:
/// checked-item ids index into it by position.
pub type Roadmap = Vec<RoadmapStep>;

/// The per-user progress document. One instance per user id; replaced
/// wholesale on save (last full save wins — no merge, no versioning, no
/// conflict detection) and removed only by explicit delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapProgressData {
    pub roadmap: Roadmap,
    /// Checkable-item id → checked flag. Unset keys read as unchecked;
    /// a key set to `false` stays present.
    pub checked_items: HashMap<String, bool>,
    pub goal: String,
    pub current_skills: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Checkable-item identity
// ────────────────────────────────────────────────────────────────────────────

/// Kind of checkable item a progress key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Task,
    Resource,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Task => "task",
            ItemKind::Resource => "resource",
        }
    }
}

/// Builds a checkable-item id: `"{kind}-{step_index}-{item_index}"`, e.g.
/// `task-0-2` or `resource-1-0`. Ids are positional and stay stable only
/// while the roadmap array ordering is unchanged.
pub fn item_id(kind: ItemKind, step_index: usize, item_index: usize) -> String {
    format!("{}-{}-{}", kind.as_str(), step_index, item_index)
}

/// Parses a checkable-item id back into its parts. Returns `None` for
/// anything that does not match the `{kind}-{step}-{index}` shape.
pub fn parse_item_id(id: &str) -> Option<(ItemKind, usize, usize)> {
    let mut parts = id.split('-');
    let kind = match parts.next()? {
        "task" => ItemKind::Task,
        "resource" => ItemKind::Resource,
        _ => return None,
    };
    let step_index: usize = parts.next()?.parse().ok()?;
    let item_index: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((kind, step_index, item_index))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
