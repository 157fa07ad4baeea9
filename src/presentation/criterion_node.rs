//! Tree renderer for the criterion tree.

use serde::Serialize;
use uuid::Uuid;

use crate::services::criterion_tree::{CriterionNode, CriterionTree, NodeData};

/// One visible tree row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeRow {
    pub label: String,
    pub depth: usize,
    /// Criterion id for selectable rows; type rows carry none.
    pub criterion_id: Option<Uuid>,
    /// Every node is expanded the first time it is rendered.
    pub open: bool,
    pub leaf: bool,
}

pub fn render_node(node: &CriterionNode, depth: usize) -> TreeRow {
    TreeRow {
        label: node.label().to_string(),
        depth,
        criterion_id: match &node.data {
            NodeData::Criterion(c) => Some(c.id),
            _ => None,
        },
        open: true,
        leaf: node.is_leaf(),
    }
}

/// Flattens the tree below the synthetic root, depth first.
pub fn render_tree(tree: &CriterionTree) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    for child in &tree.root().children {
        child.walk(&mut |node, depth| rows.push(render_node(node, depth)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Criterion, CriterionGroup, CriterionType};
    use crate::services::criterion_tree::CriterionTreeBuilder;

    #[test]
    fn test_render_tree_flattens_with_depth() {
        let skill = CriterionType::new("Skill");
        let welding = Criterion::new(&skill, "Welding");
        let tig = Criterion::new(&skill, "TIG").child_of(&welding);
        let tree = CriterionTreeBuilder::build(&[CriterionGroup {
            criterion_type: skill,
            criteria: vec![tig.clone(), welding.clone()],
        }]);

        let rows = render_tree(&tree);
        let summary: Vec<(&str, usize)> = rows.iter().map(|r| (r.label.as_str(), r.depth)).collect();
        assert_eq!(summary, vec![("Skill", 0), ("Welding", 1), ("TIG", 2)]);
        assert!(rows.iter().all(|r| r.open));
        assert_eq!(rows[0].criterion_id, None);
        assert_eq!(rows[2].criterion_id, Some(tig.id));
        assert!(rows[2].leaf);
    }
}
