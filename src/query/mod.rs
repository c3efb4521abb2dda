//! Read-only queries against the record store: search, per-node edge
//! enumeration with relation-type filtering, and filter-choice discovery.
//!
//! None of these raise on missing data; absence is always an explicit
//! "not found" value.

use std::collections::BTreeSet;

use crate::store::{Document, Edge, Node};

/// Case-insensitive substring search over names and aliases.
///
/// Returns the FIRST matching node in list order, not the best match.
/// An empty or whitespace-only query matches nothing.
pub fn find_by_name_or_alias<'a>(doc: &'a Document, query: &str) -> Option<&'a Node> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    doc.nodes.iter().find(|n| {
        n.name.to_lowercase().contains(&q)
            || n.aliases.iter().any(|a| a.to_lowercase().contains(&q))
    })
}

/// True when the filter passes every relation type. `None` and an empty
/// set both mean "no filter": an empty selection in the UI means "show
/// everything", not "show nothing".
pub(crate) fn relation_type_passes(
    allowed: Option<&BTreeSet<String>>,
    relation_type: &str,
) -> bool {
    match allowed {
        Some(set) if !set.is_empty() => set.contains(relation_type),
        _ => true,
    }
}

/// Edges touching a node (as source or target), in edge-list order,
/// restricted to the allowed relation types.
pub fn edges_for_node<'a>(
    doc: &'a Document,
    node_id: &str,
    allowed: Option<&BTreeSet<String>>,
) -> Vec<&'a Edge> {
    doc.edges
        .iter()
        .filter(|e| relation_type_passes(allowed, &e.relation_type))
        .filter(|e| e.source_id == node_id || e.target_id == node_id)
        .collect()
}

/// Relation types present in the edge set, deduplicated and sorted
/// lexicographically so filter choices render stably.
pub fn distinct_relation_types(edges: &[Edge]) -> Vec<String> {
    let set: BTreeSet<&str> = edges.iter().map(|e| e.relation_type.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_fixtures::{edge, node, small_document};

    #[test]
    fn test_search_first_match_in_list_order() {
        let doc = small_document(); // "Kim Min" before "Kim Soo"
        let hit = find_by_name_or_alias(&doc, "kim").unwrap();
        assert_eq!(hit.name, "Kim Min");
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        let doc = small_document();
        assert_eq!(find_by_name_or_alias(&doc, "  KIM SOO ").unwrap().id, "n_b");
    }

    #[test]
    fn test_search_matches_aliases() {
        let mut doc = small_document();
        let mut n = node("n_c", "Park Lee");
        n.aliases = vec!["The Professor".to_string()];
        doc.upsert_node(n).unwrap();

        assert_eq!(find_by_name_or_alias(&doc, "professor").unwrap().id, "n_c");
    }

    #[test]
    fn test_search_empty_query_is_absent() {
        let doc = small_document();
        assert!(find_by_name_or_alias(&doc, "").is_none());
        assert!(find_by_name_or_alias(&doc, "   ").is_none());
    }

    #[test]
    fn test_search_no_match_is_absent() {
        let doc = small_document();
        assert!(find_by_name_or_alias(&doc, "zzz").is_none());
    }

    fn filtered_document() -> Document {
        let mut doc = small_document();
        doc.upsert_node(node("n_c", "Park Lee")).unwrap();
        doc.add_edge(edge("e_2", "n_b", "n_c", "colleague")).unwrap();
        doc.add_edge(edge("e_3", "n_c", "n_a", "mentor")).unwrap();
        doc
    }

    #[test]
    fn test_edges_for_node_matches_either_endpoint_in_list_order() {
        let doc = filtered_document();
        let edges = edges_for_node(&doc, "n_a", None);
        let ids: Vec<_> = edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e_1", "e_3"]);
    }

    #[test]
    fn test_empty_filter_means_no_filter() {
        let doc = filtered_document();
        let empty = BTreeSet::new();

        let with_none = edges_for_node(&doc, "n_b", None);
        let with_empty = edges_for_node(&doc, "n_b", Some(&empty));

        let none_ids: Vec<_> = with_none.iter().map(|e| e.id.as_str()).collect();
        let empty_ids: Vec<_> = with_empty.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(none_ids, empty_ids);
        // Every relation type touching n_b is present
        assert_eq!(none_ids, vec!["e_1", "e_2"]);
    }

    #[test]
    fn test_filter_restricts_to_allowed_types() {
        let doc = filtered_document();
        let allowed: BTreeSet<String> = ["mentor".to_string()].into();

        let edges = edges_for_node(&doc, "n_a", Some(&allowed));
        assert!(edges.iter().all(|e| e.relation_type == "mentor"));
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_edges_for_unknown_node_is_empty() {
        let doc = filtered_document();
        assert!(edges_for_node(&doc, "n_ghost", None).is_empty());
    }

    #[test]
    fn test_distinct_relation_types_sorted_and_deduplicated() {
        let doc = filtered_document();
        let types = distinct_relation_types(&doc.edges);
        assert_eq!(types, vec!["colleague".to_string(), "mentor".to_string()]);
    }

    #[test]
    fn test_distinct_relation_types_empty_input() {
        assert!(distinct_relation_types(&[]).is_empty());
    }
}
