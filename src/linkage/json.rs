//! Depth-safe JSON decoding of linkage input.
//!
//! Nested trees from chained clusterings are as deep as they have leaves.
//! The text is parsed into a `serde_json::Value` with the recursion limit
//! lifted and the stack grown on demand, then the tree is rebuilt from an
//! explicit worklist.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::LinkageError;
use super::model::{Child, Linkage, LinkageEntry, LinkageNode};

fn malformed(reason: impl std::fmt::Display) -> LinkageError {
    LinkageError::MalformedNode {
        reason: reason.to_string(),
    }
}

/// Parse a linkage from JSON text.
///
/// An object with `left`, `right` and `height` is a tree; an array is a
/// linkage list.
///
/// # Errors
///
/// Returns [`LinkageError::MalformedNode`] when the text is not valid JSON or
/// does not match either encoding.
pub fn parse_linkage_json(json: &str) -> Result<Linkage, LinkageError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(malformed)?;
    deserializer.end().map_err(malformed)?;
    linkage_from_value(value)
}

/// Convert an already parsed JSON value into a linkage.
pub fn linkage_from_value(value: Value) -> Result<Linkage, LinkageError> {
    match value {
        Value::Array(_) => Vec::<LinkageEntry>::deserialize(value)
            .map(Linkage::List)
            .map_err(malformed),
        Value::Object(map) => tree_from_object(map).map(Linkage::Tree),
        other => Err(malformed(format!(
            "expected a tree object or a linkage array, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

enum Frame {
    Visit(Value),
    Merge(f64),
}

fn tree_from_object(root: Map<String, Value>) -> Result<LinkageNode, LinkageError> {
    let mut stack = vec![Frame::Visit(Value::Object(root))];
    let mut built: Vec<Child> = Vec::new();
    // Values no longer needed; freed without recursion at the end.
    let mut discard: Vec<Value> = Vec::new();

    let result = loop {
        let Some(frame) = stack.pop() else {
            break match built.pop() {
                Some(Child::Merge(node)) if built.is_empty() => Ok(*node),
                _ => Err(malformed("tree root must be a merge")),
            };
        };

        match frame {
            Frame::Visit(Value::Number(number)) => {
                match number.as_u64().and_then(|leaf| usize::try_from(leaf).ok()) {
                    Some(leaf) => built.push(Child::Leaf(leaf)),
                    None => break Err(malformed(format!("invalid leaf index {number}"))),
                }
            }
            Frame::Visit(Value::Object(mut map)) => {
                let left = map.remove("left");
                let right = map.remove("right");
                let height = map.remove("height");
                let merge_height = height.as_ref().and_then(Value::as_f64);
                discard.extend(map.into_iter().map(|(_, value)| value));

                match (left, right, merge_height) {
                    (Some(left), Some(right), Some(merge_height)) => {
                        // Right is pushed first so the left child is built first.
                        stack.push(Frame::Merge(merge_height));
                        stack.push(Frame::Visit(right));
                        stack.push(Frame::Visit(left));
                    }
                    (left, right, _) => {
                        discard.extend(left.into_iter().chain(right).chain(height));
                        break Err(malformed(
                            "tree node needs `left`, `right` and a numeric `height`",
                        ));
                    }
                }
            }
            Frame::Visit(other) => {
                let kind = kind_of(&other);
                discard.push(other);
                break Err(malformed(format!("invalid tree child: {kind}")));
            }
            Frame::Merge(height) => match (built.pop(), built.pop()) {
                (Some(right), Some(left)) => {
                    built.push(Child::Merge(Box::new(LinkageNode { left, right, height })));
                }
                _ => break Err(malformed("unbalanced tree")),
            },
        }
    };

    discard.extend(stack.into_iter().filter_map(|frame| match frame {
        Frame::Visit(value) => Some(value),
        Frame::Merge(_) => None,
    }));
    release(discard);
    result
}

/// Free JSON values without recursing into them.
fn release(mut values: Vec<Value>) {
    while let Some(value) = values.pop() {
        match value {
            Value::Array(items) => values.extend(items),
            Value::Object(map) => values.extend(map.into_iter().map(|(_, value)| value)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `{"left": {"left": ... {"left": 0, "right": 1} ... }, "right": n}`
    fn chain_json(leaves: usize) -> String {
        let mut json = String::new();
        for _ in 1..leaves {
            json.push_str(r#"{"left": "#);
        }
        json.push('0');
        for leaf in 1..leaves {
            json.push_str(&format!(r#", "right": {leaf}, "height": {leaf}}}"#));
        }
        json
    }

    #[test]
    fn test_small_tree() {
        let linkage =
            parse_linkage_json(r#"{"left": 0, "right": {"left": 1, "right": 2, "height": 0.5}, "height": 1}"#)
                .unwrap();
        assert_eq!(
            linkage,
            Linkage::Tree(LinkageNode::new(0, LinkageNode::new(1, 2, 0.5), 1.0))
        );
    }

    #[test]
    fn test_list_with_legacy_names() {
        let linkage = parse_linkage_json(
            r#"[{"left": 0, "isLeftDendrogram": false, "right": 1, "isRightDendrogram": false, "height": 1}]"#,
        )
        .unwrap();
        assert_eq!(linkage, Linkage::List(vec![LinkageEntry::leaves(0, 1, 1.0)]));
    }

    #[test]
    fn test_deep_chain_parses() {
        let leaves = 500;
        let Linkage::Tree(root) = parse_linkage_json(&chain_json(leaves)).unwrap() else {
            panic!("expected tree");
        };
        assert_eq!(root.right, Child::Leaf(leaves - 1));
        assert_eq!(root.height, (leaves - 1) as f64);
    }

    #[test]
    fn test_very_deep_chain_parses() {
        let leaves = 20_000;
        let linkage = parse_linkage_json(&chain_json(leaves)).unwrap();
        assert!(linkage.is_tree());
    }

    #[test]
    fn test_rejects_bad_shapes() {
        for json in [
            r#"{"left": 0}"#,
            r#"{"left": -1, "right": 1, "height": 1}"#,
            r#"{"left": "a", "right": 1, "height": 1}"#,
            r#"{"left": 0, "right": 1, "height": "tall"}"#,
            r#"3"#,
            r#"[{"left": 0}]"#,
            r#"{"left": 0, "right": 1, "height": 1} trailing"#,
        ] {
            assert!(
                matches!(parse_linkage_json(json), Err(LinkageError::MalformedNode { .. })),
                "{json}"
            );
        }
    }
}
