//! Hitbox document

use serde_json::Value;

/// One entry of a hitbox document, positioned in percent of the screen box
#[derive(Debug, Clone, PartialEq)]
pub struct Hitbox {
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub action: Option<String>,
    pub arg: Option<String>,
}

/// Ordered hitbox entries for one screen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HitboxSpec {
    pub hitboxes: Vec<Hitbox>,
}

impl HitboxSpec {
    /// Read `{ hitboxes: [...] }`; a missing or non-array list yields no entries
    /// and non-object entries are skipped.
    pub fn from_document(doc: &Value) -> Self {
        let hitboxes = doc
            .get("hitboxes")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(Hitbox::from_value).collect())
            .unwrap_or_default();
        Self { hitboxes }
    }

    pub fn len(&self) -> usize {
        self.hitboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hitboxes.is_empty()
    }
}

impl Hitbox {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let number = |key: &str| -> f32 {
            match obj.get(key) {
                Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0) as f32,
                Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
                _ => 0.0,
            }
        };

        Some(Self {
            id: obj.get("id").and_then(scalar_string).filter(|s| !s.is_empty()),
            x: number("x"),
            y: number("y"),
            w: number("w"),
            h: number("h"),
            action: obj
                .get("action")
                .and_then(scalar_string)
                .filter(|s| !s.is_empty()),
            arg: obj.get("arg").and_then(scalar_string),
        })
    }
}

/// Strings verbatim; numbers and booleans stringified; anything else absent
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
