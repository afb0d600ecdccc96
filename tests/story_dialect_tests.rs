//! Story documents in every accepted dialect normalize to the same graph

use serde_json::json;
use versecraft::domain::NodeId;
use versecraft::story::normalize;

#[test]
fn three_dialects_encoding_the_same_story_are_identical() {
    let scenes = normalize(&json!({
        "start": "S01",
        "scenes": {
            "S01": { "text": "You wake up.", "options": [
                { "label": "Stand", "to": "S02" },
                { "label": "Sleep", "to": "S01" }
            ]},
            "S02": { "text": "The room is **empty**." }
        }
    }));

    let sections = normalize(&json!({
        "entry": "S01",
        "sections": [
            { "id": "S01", "body": "You wake up.", "choices": [
                { "text": "Stand", "next": "S02" },
                { "title": "Sleep", "go": "S01" }
            ]},
            { "key": "S02", "narrative": "The room is **empty**." }
        ]
    }));

    let nodes = normalize(&json!({
        "root": "S01",
        "nodes": {
            "S01": { "content": "You wake up.", "links": [
                { "name": "Stand", "target": "S02" },
                { "label": "Sleep", "id": "S01" }
            ]},
            "S02": { "text": "The room is **empty**.", "choice": [] }
        }
    }));

    assert_eq!(scenes, sections);
    assert_eq!(scenes, nodes);
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes.entry_node_id(), Some(&NodeId::from("S01")));
}

#[test]
fn every_normalized_choice_is_labelled_and_targets_a_node() {
    let graph = normalize(&json!({
        "nodes": {
            "a": { "text": "a", "choices": [
                { "to": "b" },
                { "label": "   ", "next": "c" },
                { "label": "nowhere", "to": "zzz" },
                { "label": "no target" },
                "bare",
                null,
                { "label": 7, "to": "a" }
            ]},
            "b": { "body": "b", "options": [ { "label": "back", "to": "a" } ] },
            "c": {}
        }
    }));

    for node in graph.nodes() {
        for choice in node.options() {
            assert!(!choice.label().trim().is_empty());
            assert!(graph.contains(choice.target()));
        }
    }

    let labels: Vec<_> = graph
        .node(&NodeId::from("a"))
        .unwrap()
        .options()
        .iter()
        .map(|c| c.label().to_string())
        .collect();
    assert_eq!(labels, vec!["Continue", "Continue", "7"]);
}

#[test]
fn declared_order_decides_the_fallback_entry_node() {
    let graph = normalize(&json!({
        "start": "missing",
        "scenes": {
            "zeta": { "text": "first declared" },
            "alpha": { "text": "second declared" }
        }
    }));

    assert_eq!(graph.entry_node_id(), Some(&NodeId::from("zeta")));
}
