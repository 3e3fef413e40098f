//! Pure helpers over the pre-built category tree.
//!
//! Expansion state belongs to the caller (the admin UI keeps it per
//! view); these functions only read it. Nothing here touches the
//! store.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::categories::dtos::CategoryTreeDto;

/// Label of the synthetic "no parent" row at the top of the picker
pub const ROOT_SENTINEL_LABEL: &str = "Tanpa induk";

/// One display row of the parent picker
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TreeRow {
    /// None for the root sentinel row
    pub id: Option<Uuid>,
    pub name: String,
    /// Indentation level; the sentinel and root categories sit at 0
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    /// Shown but not selectable (the category being edited)
    pub disabled: bool,
}

/// Render the tree into picker rows.
///
/// The first row is always the root sentinel, so an empty tree still
/// renders one selectable row. Children of collapsed nodes are not
/// emitted.
pub fn render(
    nodes: &[CategoryTreeDto],
    exclude_id: Option<Uuid>,
    expanded: &HashSet<Uuid>,
) -> Vec<TreeRow> {
    let mut rows = vec![TreeRow {
        id: None,
        name: ROOT_SENTINEL_LABEL.to_string(),
        depth: 0,
        has_children: false,
        expanded: false,
        disabled: false,
    }];

    for node in nodes {
        render_node(node, 0, exclude_id, expanded, &mut rows);
    }

    rows
}

fn render_node(
    node: &CategoryTreeDto,
    depth: usize,
    exclude_id: Option<Uuid>,
    expanded: &HashSet<Uuid>,
    rows: &mut Vec<TreeRow>,
) {
    let is_expanded = expanded.contains(&node.id);

    rows.push(TreeRow {
        id: Some(node.id),
        name: node.name.clone(),
        depth,
        has_children: !node.children.is_empty(),
        expanded: is_expanded,
        disabled: exclude_id == Some(node.id),
    });

    if is_expanded {
        for child in &node.children {
            render_node(child, depth + 1, exclude_id, expanded, rows);
        }
    }
}

/// Flip membership of `id` in the expanded set
pub fn toggle_expand(expanded: &mut HashSet<Uuid>, id: Uuid) {
    if !expanded.insert(id) {
        expanded.remove(&id);
    }
}

/// Depth-first search returning the first node with the given id
pub fn find_by_id(nodes: &[CategoryTreeDto], id: Uuid) -> Option<&CategoryTreeDto> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Names of every strict descendant of `node`, depth-first
pub fn descendant_names(node: &CategoryTreeDto) -> Vec<String> {
    let mut names = Vec::new();
    collect_descendant_names(node, &mut names);
    names
}

fn collect_descendant_names(node: &CategoryTreeDto, names: &mut Vec<String>) {
    for child in &node.children {
        names.push(child.name.clone());
        collect_descendant_names(child, names);
    }
}

/// Walk the parent chain upward from `start`; true if it passes
/// through `target`.
///
/// The walk is bounded by the map size, so stored data that already
/// contains a cycle cannot loop forever; such a chain is treated as
/// containing the target so the write is refused.
pub fn parent_chain_contains(
    parents: &HashMap<Uuid, Option<Uuid>>,
    start: Option<Uuid>,
    target: Uuid,
) -> bool {
    let mut current = start;
    let mut steps = 0usize;

    while let Some(id) = current {
        if id == target {
            return true;
        }
        steps += 1;
        if steps > parents.len() {
            return true;
        }
        current = parents.get(&id).copied().flatten();
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: Uuid, name: &str, children: Vec<CategoryTreeDto>) -> CategoryTreeDto {
        CategoryTreeDto {
            id,
            name: name.to_string(),
            description: None,
            image_url: None,
            sort_order: 0,
            children,
        }
    }

    fn sample_tree() -> (Vec<CategoryTreeDto>, Uuid, Uuid, Uuid) {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let tree = vec![node(
            a,
            "Elektronik",
            vec![node(b, "Audio", vec![node(c, "Headphone", vec![])])],
        )];
        (tree, a, b, c)
    }

    #[test]
    fn test_render_empty_tree_yields_only_sentinel() {
        let rows = render(&[], None, &HashSet::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[0].name, ROOT_SENTINEL_LABEL);
    }

    #[test]
    fn test_render_collapsed_node_hides_children() {
        let (tree, a, ..) = sample_tree();
        let rows = render(&tree, None, &HashSet::new());
        // sentinel + root only; "Audio" is behind the collapsed root
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, Some(a));
        assert!(rows[1].has_children);
        assert!(!rows[1].expanded);
    }

    #[test]
    fn test_render_expanded_chain_emits_descendants_with_depth() {
        let (tree, a, b, c) = sample_tree();
        let expanded: HashSet<Uuid> = [a, b].into_iter().collect();
        let rows = render(&tree, None, &expanded);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].depth, 0);
        assert_eq!(rows[2].id, Some(b));
        assert_eq!(rows[2].depth, 1);
        assert_eq!(rows[3].id, Some(c));
        assert_eq!(rows[3].depth, 2);
        assert!(!rows[3].has_children);
    }

    #[test]
    fn test_render_excluded_node_is_disabled_but_shown() {
        let (tree, a, b, _) = sample_tree();
        let expanded: HashSet<Uuid> = [a].into_iter().collect();
        let rows = render(&tree, Some(b), &expanded);
        let excluded = rows.iter().find(|r| r.id == Some(b)).unwrap();
        assert!(excluded.disabled);
        assert!(!rows[1].disabled);
    }

    #[test]
    fn test_toggle_expand_flips_membership() {
        let id = Uuid::new_v4();
        let mut expanded = HashSet::new();
        toggle_expand(&mut expanded, id);
        assert!(expanded.contains(&id));
        toggle_expand(&mut expanded, id);
        assert!(!expanded.contains(&id));
    }

    #[test]
    fn test_find_by_id_reaches_grandchild() {
        let (tree, _, _, c) = sample_tree();
        assert_eq!(find_by_id(&tree, c).map(|n| n.id), Some(c));
    }

    #[test]
    fn test_find_by_id_missing_is_none() {
        let (tree, ..) = sample_tree();
        assert!(find_by_id(&tree, Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_descendant_names_depth_first() {
        let (tree, ..) = sample_tree();
        assert_eq!(
            descendant_names(&tree[0]),
            vec!["Audio".to_string(), "Headphone".to_string()]
        );
    }

    #[test]
    fn test_parent_chain_contains_direct_parent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let parents: HashMap<Uuid, Option<Uuid>> =
            [(a, None), (b, Some(a))].into_iter().collect();
        assert!(parent_chain_contains(&parents, Some(b), a));
        assert!(!parent_chain_contains(&parents, Some(a), b));
    }

    #[test]
    fn test_parent_chain_contains_multi_hop() {
        // Reparenting A under C where A -> B -> C would close a cycle
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let parents: HashMap<Uuid, Option<Uuid>> =
            [(a, None), (b, Some(a)), (c, Some(b))].into_iter().collect();
        assert!(parent_chain_contains(&parents, Some(c), a));
    }

    #[test]
    fn test_parent_chain_refuses_preexisting_cycle() {
        // Corrupted data: a <-> b. The bounded walk gives up and
        // reports containment rather than spinning.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let target = Uuid::new_v4();
        let parents: HashMap<Uuid, Option<Uuid>> =
            [(a, Some(b)), (b, Some(a))].into_iter().collect();
        assert!(parent_chain_contains(&parents, Some(a), target));
    }
}
