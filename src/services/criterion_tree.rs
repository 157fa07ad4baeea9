//! Criterion tree builder.
//!
//! Turns criteria grouped by criterion type into a display tree:
//!
//! ```text
//! (root)
//! ├── Department
//! │   └── Engineering
//! │       ├── Backend
//! │       └── Frontend
//! └── Skill
//!     └── Welding
//! ```
//!
//! Type nodes hold only root criteria; nested criteria hang below their
//! parent at any depth. Siblings are sorted by name at every level.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::domain::models::{Criterion, CriterionGroup, CriterionType};

/// Payload of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    Root,
    Type(CriterionType),
    Criterion(Criterion),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionNode {
    pub data: NodeData,
    pub children: Vec<CriterionNode>,
}

impl CriterionNode {
    /// Type name, criterion name, or empty for the synthetic root.
    pub fn label(&self) -> &str {
        match &self.data {
            NodeData::Root => "",
            NodeData::Type(t) => &t.name,
            NodeData::Criterion(c) => &c.name,
        }
    }

    pub fn criterion(&self) -> Option<&Criterion> {
        match &self.data {
            NodeData::Criterion(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first walk, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a CriterionNode, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a CriterionNode, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}

/// Display tree over every criterion offered for the current allocation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionTree {
    root: CriterionNode,
}

impl Default for CriterionTree {
    fn default() -> Self {
        Self {
            root: CriterionNode {
                data: NodeData::Root,
                children: Vec::new(),
            },
        }
    }
}

impl CriterionTree {
    pub fn root(&self) -> &CriterionNode {
        &self.root
    }

    /// Every criterion in the tree, depth first.
    pub fn criteria(&self) -> Vec<&Criterion> {
        let mut result = Vec::new();
        self.root.walk(&mut |node, _| {
            if let Some(c) = node.criterion() {
                result.push(c);
            }
        });
        result
    }

    pub fn find_criterion(&self, id: Uuid) -> Option<&Criterion> {
        self.criteria().into_iter().find(|c| c.id == id)
    }

    /// Criteria for the given ids, ignoring ids that are not criterion nodes
    /// of this tree. Keeps the order of `ids`.
    pub fn select(&self, ids: &[Uuid]) -> Vec<Criterion> {
        let index: HashMap<Uuid, &Criterion> = self.criteria().into_iter().map(|c| (c.id, c)).collect();
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| index.get(id).map(|c| (*c).clone()))
            .collect()
    }

    /// Child indexes leading from the root to the criterion, first match in
    /// depth-first order.
    pub fn path_to(&self, criterion_id: Uuid) -> Option<Vec<usize>> {
        fn search(node: &CriterionNode, id: Uuid, path: &mut Vec<usize>) -> bool {
            if node.criterion().is_some_and(|c| c.id == id) {
                return true;
            }
            for (i, child) in node.children.iter().enumerate() {
                path.push(i);
                if search(child, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        search(&self.root, criterion_id, &mut path).then_some(path)
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&CriterionNode> {
        path.iter()
            .try_fold(&self.root, |node, &i| node.children.get(i))
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.root.walk(&mut |_, _| count += 1);
        count
    }
}

pub struct CriterionTreeBuilder;

impl CriterionTreeBuilder {
    pub fn build(groups: &[CriterionGroup]) -> CriterionTree {
        let mut type_nodes: Vec<CriterionNode> = groups.iter().map(Self::type_node).collect();
        type_nodes.sort_by(|a, b| a.label().cmp(b.label()));

        CriterionTree {
            root: CriterionNode {
                data: NodeData::Root,
                children: type_nodes,
            },
        }
    }

    fn type_node(group: &CriterionGroup) -> CriterionNode {
        let mut children_of: HashMap<Uuid, Vec<&Criterion>> = HashMap::new();
        for criterion in &group.criteria {
            if let Some(parent) = criterion.parent_id {
                children_of.entry(parent).or_default().push(criterion);
            }
        }

        let roots: Vec<&Criterion> = group.criteria.iter().filter(|c| c.is_root()).collect();
        let mut path = HashSet::new();

        CriterionNode {
            data: NodeData::Type(group.criterion_type.clone()),
            children: Self::nodes(roots, &children_of, &mut path),
        }
    }

    fn nodes(
        mut criteria: Vec<&Criterion>,
        children_of: &HashMap<Uuid, Vec<&Criterion>>,
        path: &mut HashSet<Uuid>,
    ) -> Vec<CriterionNode> {
        criteria.sort_by(|a, b| Criterion::by_name(a, b));
        criteria
            .into_iter()
            .filter_map(|criterion| {
                // a criterion reachable from itself would recurse forever
                if !path.insert(criterion.id) {
                    tracing::warn!(criterion = %criterion.id, "criterion hierarchy contains a cycle");
                    return None;
                }
                let children = children_of.get(&criterion.id).cloned().unwrap_or_default();
                let node = CriterionNode {
                    data: NodeData::Criterion(criterion.clone()),
                    children: Self::nodes(children, children_of, path),
                };
                path.remove(&criterion.id);
                Some(node)
            })
            .collect()
    }
}
