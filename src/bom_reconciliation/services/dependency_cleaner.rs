use crate::bom_reconciliation::domain::{Component, Dependency};
use std::collections::HashSet;

/// Drops dependency entries that point at components not in `components`.
///
/// Top-level entries with an unknown ref are removed. Nested entries are
/// pruned at every depth, so afterwards every ref in the returned graph
/// names a component `bom-ref`.
pub fn remove_invalid_dependencies_and_references(
    components: &[Component],
    dependencies: Vec<Dependency>,
) -> Vec<Dependency> {
    let valid_refs: HashSet<&str> = components
        .iter()
        .map(Component::bom_ref_str)
        .filter(|r| !r.is_empty())
        .collect();

    dependencies
        .into_iter()
        .filter(|d| {
            let keep = valid_refs.contains(d.bom_ref.as_str());
            if !keep {
                tracing::debug!(bom_ref = %d.bom_ref, "dropping dependency on unknown component");
            }
            keep
        })
        .map(|d| prune_nested(d, &valid_refs))
        .collect()
}

fn prune_nested(mut dependency: Dependency, valid_refs: &HashSet<&str>) -> Dependency {
    dependency.depends_on = std::mem::take(&mut dependency.depends_on)
        .into_iter()
        .filter(|child| valid_refs.contains(child.bom_ref.as_str()))
        .map(|child| prune_nested(child, valid_refs))
        .collect();
    dependency
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(refs: &[&str]) -> Vec<Component> {
        refs.iter()
            .map(|r| Component::new(*r, "1", *r))
            .collect()
    }

    #[test]
    fn test_drops_unknown_top_level_refs() {
        let components = components(&["a", "b"]);
        let dependencies = vec![
            Dependency::with_refs("a", ["b"]),
            Dependency::with_refs("gone", ["a"]),
        ];

        let pruned = remove_invalid_dependencies_and_references(&components, dependencies);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].bom_ref, "a");
    }

    #[test]
    fn test_prunes_nested_refs() {
        let components = components(&["a", "b"]);
        let dependencies = vec![Dependency::with_refs("a", ["b", "gone"])];

        let pruned = remove_invalid_dependencies_and_references(&components, dependencies);
        assert_eq!(pruned[0].child_refs().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_prunes_at_every_depth() {
        let components = components(&["a", "b", "c"]);
        let mut b = Dependency::new("b");
        b.depends_on = vec![Dependency::new("c"), Dependency::with_refs("gone", ["a"])];
        let mut a = Dependency::new("a");
        a.depends_on = vec![b];

        let pruned = remove_invalid_dependencies_and_references(&components, vec![a]);

        for bom_ref in pruned.iter().flat_map(|d| d.all_refs()) {
            assert!(["a", "b", "c"].contains(&bom_ref), "dangling ref {}", bom_ref);
        }
        assert_eq!(pruned[0].depends_on[0].depends_on.len(), 1);
    }

    #[test]
    fn test_components_without_bom_ref_are_not_targets() {
        let components = vec![Component::new("a", "1", "")];
        let pruned =
            remove_invalid_dependencies_and_references(&components, vec![Dependency::new("a")]);
        assert!(pruned.is_empty());
    }
}
