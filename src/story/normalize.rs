//! Story graph normalizer
//!
//! Accepts the story JSON dialects found in content packs:
//!
//! ```text
//! { "start": "S01", "scenes":   { "S01": { "text": "...", "options": [{ "label": "...", "to": "S02" }] } } }
//! { "start": "S01", "sections": [ { "id": "S01", "text": "...", "choices": [{ "text": "...", "next": "S02" }] } ] }
//! { "entry": "S01", "nodes":    { "S01": { "body": "...", "links": [{ "title": "...", "target": "S02" }] } } }
//! ```
//!
//! Every field is looked up through an ordered fallback list with
//! [`first_present`]; the first populated name wins, values are never merged.

use crate::config::StoryConfig;
use crate::domain::value_objects::NodeId;
use crate::types::hitbox::scalar_string;
use crate::types::story::{Choice, SceneNode, StoryGraph};
use serde_json::Value;
use std::collections::HashSet;

/// Document-level mappings of node id to node, in precedence order
pub const NODE_MAP_FIELDS: &[&str] = &["scenes", "nodes"];
/// Document-level arrays of self-identifying nodes
pub const NODE_ARRAY_FIELDS: &[&str] = &["sections"];
/// Start node reference
pub const START_FIELDS: &[&str] = &["start", "entry", "begin", "root"];
/// Id of a node inside a node array
pub const NODE_ID_FIELDS: &[&str] = &["id", "key", "name"];
/// Node text
pub const TEXT_FIELDS: &[&str] = &["text", "body", "narrative", "content"];
/// Node choice collection
pub const CHOICE_FIELDS: &[&str] = &["options", "choices", "choice", "links"];
/// Choice label
pub const LABEL_FIELDS: &[&str] = &["label", "text", "title", "name"];
/// Choice target
pub const TARGET_FIELDS: &[&str] = &["to", "next", "go", "target", "id"];

/// First populated field of `object` among `names`.
///
/// Null, missing and blank strings are not populated; anything else is,
/// including empty arrays.
pub fn first_present<'a>(object: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let map = object.as_object()?;
    names
        .iter()
        .filter_map(|name| map.get(*name))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

/// [`first_present`] narrowed to a trimmed scalar string
fn first_string(object: &Value, names: &[&str]) -> Option<String> {
    first_present(object, names)
        .and_then(scalar_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Normalize with the default story settings
pub fn normalize(raw: &Value) -> StoryGraph {
    normalize_with(raw, &StoryConfig::default())
}

/// Convert any accepted dialect into a [`StoryGraph`]. Never fails; input
/// without a recognisable node collection yields an empty graph.
pub fn normalize_with(raw: &Value, config: &StoryConfig) -> StoryGraph {
    let start = first_string(raw, START_FIELDS)
        .map(NodeId::from)
        .unwrap_or_else(|| config.default_start.clone());
    let mut graph = StoryGraph::new(start);

    if let Some(map) = NODE_MAP_FIELDS
        .iter()
        .find_map(|field| raw.get(*field).and_then(Value::as_object))
    {
        for (id, node) in map {
            let id = id.trim();
            if id.is_empty() {
                continue;
            }
            if let Some(node) = normalize_node(NodeId::from(id), node, config) {
                graph.insert(node);
            }
        }
    } else if let Some(items) = NODE_ARRAY_FIELDS
        .iter()
        .find_map(|field| raw.get(*field).and_then(Value::as_array))
    {
        for item in items {
            let Some(id) = first_string(item, NODE_ID_FIELDS) else {
                log::debug!("[story] dropping section without id");
                continue;
            };
            if let Some(node) = normalize_node(NodeId::from(id), item, config) {
                graph.insert(node);
            }
        }
    } else {
        log::warn!("[story] document has no scenes, nodes or sections");
    }

    drop_dangling_choices(&mut graph);
    graph
}

fn normalize_node(id: NodeId, node: &Value, config: &StoryConfig) -> Option<SceneNode> {
    if !node.is_object() {
        log::debug!("[story] dropping non-object node {}", id);
        return None;
    }

    let text = first_present(node, TEXT_FIELDS)
        .and_then(scalar_string)
        .unwrap_or_default();

    let options = first_present(node, CHOICE_FIELDS)
        .and_then(Value::as_array)
        .map(|raw| {
            raw.iter()
                .filter_map(|choice| normalize_choice(choice, config))
                .collect()
        })
        .unwrap_or_default();

    Some(SceneNode::new(id, text, options))
}

fn normalize_choice(raw: &Value, config: &StoryConfig) -> Option<Choice> {
    // Bare strings carry a label but never a target.
    if !raw.is_object() {
        return None;
    }

    let label = first_string(raw, LABEL_FIELDS);
    let target = first_string(raw, TARGET_FIELDS)?;
    Some(Choice::new(
        label.unwrap_or_else(|| config.continue_label.clone()),
        NodeId::from(target),
    ))
}

/// Remove choices whose target is not a node of the same graph
fn drop_dangling_choices(graph: &mut StoryGraph) {
    let ids: HashSet<NodeId> = graph.nodes().map(|node| node.id().clone()).collect();
    for node in graph.nodes_mut() {
        let before = node.options().len();
        node.options_mut().retain(|choice| ids.contains(choice.target()));
        let dropped = before - node.options().len();
        if dropped > 0 {
            log::debug!(
                "[story] dropped {} choices with unknown targets from {}",
                dropped,
                node.id()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_present_skips_null_and_blank_values() {
        let obj = json!({ "text": "  ", "body": null, "narrative": "here", "content": "later" });
        assert_eq!(first_present(&obj, TEXT_FIELDS), Some(&json!("here")));
        assert_eq!(first_present(&json!("scalar"), TEXT_FIELDS), None);
    }

    #[test]
    fn text_fallback_takes_first_populated_field_only() {
        let graph = normalize(&json!({
            "scenes": { "S01": { "body": "from body", "content": "from content" } }
        }));
        assert_eq!(graph.node(&NodeId::from("S01")).unwrap().text(), "from body");
    }

    #[test]
    fn start_defaults_when_absent() {
        let graph = normalize(&json!({ "scenes": {} }));
        assert_eq!(graph.start().as_str(), "S01");
        assert!(graph.is_empty());

        let graph = normalize(&json!({ "begin": "intro", "scenes": {} }));
        assert_eq!(graph.start().as_str(), "intro");
    }

    #[test]
    fn choice_without_label_gets_placeholder() {
        let graph = normalize(&json!({
            "scenes": {
                "A": { "text": "a", "options": [ { "next": "B" } ] },
                "B": { "text": "b" }
            }
        }));
        let options = graph.node(&NodeId::from("A")).unwrap().options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label(), "Continue");
        assert_eq!(options[0].target().as_str(), "B");
    }

    #[test]
    fn unusable_choices_are_dropped_individually() {
        let graph = normalize(&json!({
            "scenes": {
                "A": { "text": "a", "options": [
                    "bare label",
                    { "label": "no target" },
                    {},
                    { "label": "dangling", "to": "Z" },
                    { "label": "kept", "to": "B" },
                    42
                ]},
                "B": { "text": "b" }
            }
        }));
        let options = graph.node(&NodeId::from("A")).unwrap().options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].label(), "kept");
    }

    #[test]
    fn scenes_take_precedence_over_other_collections() {
        let graph = normalize(&json!({
            "scenes": { "X": { "text": "scene" } },
            "nodes": { "Y": { "text": "node" } },
            "sections": [ { "id": "Z", "text": "section" } ]
        }));
        assert_eq!(graph.len(), 1);
        assert!(graph.contains(&NodeId::from("X")));
    }

    #[test]
    fn sections_use_id_fallbacks_and_skip_anonymous_entries() {
        let graph = normalize(&json!({
            "sections": [
                { "key": "K1", "text": "one" },
                { "text": "anonymous" },
                "junk",
                { "name": "K2", "text": "two" }
            ]
        }));
        let ids: Vec<_> = graph.nodes().map(|n| n.id().to_string()).collect();
        assert_eq!(ids, vec!["K1", "K2"]);
    }

    #[test]
    fn malformed_documents_yield_empty_graphs() {
        for raw in [json!(null), json!("story"), json!([1, 2]), json!({ "scenes": "nope" })] {
            assert!(normalize(&raw).is_empty());
        }
    }

    #[test]
    fn choice_collection_that_is_not_an_array_yields_no_choices() {
        let graph = normalize(&json!({
            "scenes": { "A": { "text": "a", "options": { "label": "x", "to": "A" } } }
        }));
        assert!(graph.node(&NodeId::from("A")).unwrap().options().is_empty());
    }

    #[test]
    fn numeric_ids_and_targets_are_stringified() {
        let graph = normalize(&json!({
            "start": 1,
            "sections": [
                { "id": 1, "text": "one", "choices": [ { "label": "on", "to": 2 } ] },
                { "id": 2, "text": "two" }
            ]
        }));
        assert_eq!(graph.start().as_str(), "1");
        let node = graph.node(&NodeId::from("1")).unwrap();
        assert_eq!(node.options()[0].target().as_str(), "2");
    }
}
