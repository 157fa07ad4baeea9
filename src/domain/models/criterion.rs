//! Criterion domain model.
//!
//! Criteria are hierarchical tags (skills, departments, ...) used to classify
//! resources. Every criterion belongs to a criterion type and may have a
//! parent criterion of the same type.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::resource::ResourceKind;

/// Groups top-level criteria, e.g. "Skill" or "Department".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CriterionType {
    pub id: Uuid,
    pub name: String,
    /// Kind of resource this type classifies; `None` means both.
    #[serde(default)]
    pub applies_to: Option<ResourceKind>,
}

impl CriterionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            applies_to: None,
        }
    }

    pub fn applying_to(mut self, kind: ResourceKind) -> Self {
        self.applies_to = Some(kind);
        self
    }

    pub fn applies_to_kind(&self, kind: ResourceKind) -> bool {
        self.applies_to.is_none_or(|k| k == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    pub id: Uuid,
    pub name: String,
    pub type_id: Uuid,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

impl Criterion {
    pub fn new(criterion_type: &CriterionType, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            type_id: criterion_type.id,
            parent_id: None,
            active: true,
        }
    }

    pub fn child_of(mut self, parent: &Criterion) -> Self {
        self.parent_id = Some(parent.id);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Comma-joined names.
    pub fn caption_for(criteria: &[Criterion]) -> String {
        criteria
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Ordering used wherever criteria are listed for display.
    pub fn by_name(a: &Criterion, b: &Criterion) -> std::cmp::Ordering {
        a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id))
    }
}

/// All criteria of one criterion type, as returned by the resource searcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionGroup {
    pub criterion_type: CriterionType,
    pub criteria: Vec<Criterion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_of_sets_parent() {
        let skill = CriterionType::new("Skill");
        let parent = Criterion::new(&skill, "Welding");
        let child = Criterion::new(&skill, "TIG").child_of(&parent);
        assert!(parent.is_root());
        assert_eq!(child.parent_id, Some(parent.id));
    }

    #[test]
    fn test_applies_to_kind() {
        let any = CriterionType::new("Location");
        let workers = CriterionType::new("Skill").applying_to(ResourceKind::Worker);
        assert!(any.applies_to_kind(ResourceKind::Machine));
        assert!(!workers.applies_to_kind(ResourceKind::Machine));
    }

    #[test]
    fn test_caption_for() {
        let skill = CriterionType::new("Skill");
        let criteria = vec![Criterion::new(&skill, "Welding"), Criterion::new(&skill, "Painting")];
        assert_eq!(Criterion::caption_for(&criteria), "Welding, Painting");
    }
}
