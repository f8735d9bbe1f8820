//! Patch sanitizer: keeps excluded fields out of stored history.
//!
//! An operation is dropped when its `path` (or `from`, for move/copy) lies
//! at or under an excluded pointer. A move/copy reading from an ancestor of
//! an excluded pointer is dropped too, as is a `test` on such an ancestor,
//! since both would carry excluded content. An `add`/`replace` that targets
//! an ancestor keeps its place in the patch but has the excluded sub-tree
//! scrubbed from the value it carries.

use crate::patch::model::{Patch, PatchOperation};
use crate::patch::pointer::JsonPointer;
use serde_json::Value;

/// Return `patch` without operations touching `excluded` paths.
///
/// Order of the surviving operations is preserved and the input is left
/// untouched. Applying the function twice gives the same result as once.
pub fn sanitize(patch: &Patch, excluded: &[JsonPointer]) -> Patch {
    if excluded.is_empty() {
        return patch.clone();
    }

    patch
        .iter()
        .filter(|op| !touches_excluded(op, excluded))
        .map(|op| scrub(op.clone(), excluded))
        .collect()
}

fn is_excluded(path: &JsonPointer, excluded: &[JsonPointer]) -> bool {
    excluded.iter().any(|prefix| path.starts_with(prefix))
}

fn encloses_excluded(path: &JsonPointer, excluded: &[JsonPointer]) -> bool {
    excluded
        .iter()
        .any(|prefix| path.relative_segments(prefix).is_some())
}

fn touches_excluded(op: &PatchOperation, excluded: &[JsonPointer]) -> bool {
    if is_excluded(op.path(), excluded) {
        return true;
    }
    match op {
        PatchOperation::Move { from, .. } | PatchOperation::Copy { from, .. } => {
            is_excluded(from, excluded) || encloses_excluded(from, excluded)
        }
        PatchOperation::Test { path, .. } => encloses_excluded(path, excluded),
        _ => false,
    }
}

fn scrub(op: PatchOperation, excluded: &[JsonPointer]) -> PatchOperation {
    match op {
        PatchOperation::Add { path, mut value } => {
            strip_descendants(&path, &mut value, excluded);
            PatchOperation::Add { path, value }
        }
        PatchOperation::Replace { path, mut value } => {
            strip_descendants(&path, &mut value, excluded);
            PatchOperation::Replace { path, value }
        }
        other => other,
    }
}

fn strip_descendants(path: &JsonPointer, value: &mut Value, excluded: &[JsonPointer]) {
    for prefix in excluded {
        if let Some(relative) = path.relative_segments(prefix) {
            remove_at(value, relative);
        }
    }
}

fn remove_at(value: &mut Value, segments: &[String]) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = value;
    for segment in parents {
        let next = match current {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get_mut(index)),
            _ => None,
        };
        match next {
            Some(child) => current = child,
            None => return,
        }
    }

    // Array elements are left in place; removing one would shift its siblings.
    if let Value::Object(map) = current {
        map.remove(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pointers(raw: &[&str]) -> Vec<JsonPointer> {
        raw.iter().map(|p| JsonPointer::parse(p).unwrap()).collect()
    }

    fn patch(value: Value) -> Patch {
        Patch::from_value(value).unwrap()
    }

    #[test]
    fn test_strips_excluded_prefix_and_descendants() {
        let input = patch(json!([
            {"op": "replace", "path": "/age", "value": 17},
            {"op": "add", "path": "/bag", "value": {"phone": "1"}},
            {"op": "replace", "path": "/bag/phone", "value": "2"},
            {"op": "replace", "path": "/name", "value": "Jo"}
        ]));
        let out = sanitize(&input, &pointers(&["/bag"]));
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!([
                {"op": "replace", "path": "/age", "value": 17},
                {"op": "replace", "path": "/name", "value": "Jo"}
            ])
        );
    }

    #[test]
    fn test_similar_names_are_not_excluded() {
        let input = patch(json!([
            {"op": "replace", "path": "/bagel", "value": 1},
            {"op": "replace", "path": "/ba", "value": 2}
        ]));
        let out = sanitize(&input, &pointers(&["/bag"]));
        assert_eq!(out, input);
    }

    #[test]
    fn test_move_and_copy_sources_are_checked() {
        let input = patch(json!([
            {"op": "copy", "from": "/bag/phone", "path": "/contact"},
            {"op": "move", "from": "/nick", "path": "/bag/alias"},
            {"op": "move", "from": "/nick", "path": "/alias"}
        ]));
        let out = sanitize(&input, &pointers(&["/bag"]));
        assert_eq!(out.len(), 1);
        assert_eq!(out.operations()[0].path().to_string(), "/alias");
    }

    #[test]
    fn test_copy_or_test_of_an_enclosing_tree_is_dropped() {
        let input = patch(json!([
            {"op": "copy", "from": "", "path": "/snapshot"},
            {"op": "move", "from": "/profile", "path": "/old_profile"},
            {"op": "test", "path": "", "value": {"bag": {"phone": "1"}}},
            {"op": "test", "path": "/age", "value": 17},
            {"op": "copy", "from": "/name", "path": "/alias"}
        ]));
        let out = sanitize(&input, &pointers(&["/bag", "/profile/secret"]));
        let paths: Vec<String> = out.iter().map(|o| o.path().to_string()).collect();
        assert_eq!(paths, ["/age", "/alias"]);
        assert_eq!(sanitize(&out, &pointers(&["/bag", "/profile/secret"])), out);
    }

    #[test]
    fn test_ancestor_values_are_scrubbed() {
        let input = patch(json!([
            {"op": "replace", "path": "", "value": {"id": 1, "bag": {"phone": "1"}}}
        ]));
        let out = sanitize(&input, &pointers(&["/bag"]));
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!([{"op": "replace", "path": "", "value": {"id": 1}}])
        );
    }

    #[test]
    fn test_nested_scrub_inside_added_object() {
        let input = patch(json!([
            {"op": "add", "path": "/profile", "value": {"secret": "x", "nick": "j"}}
        ]));
        let out = sanitize(&input, &pointers(&["/profile/secret"]));
        assert_eq!(
            out.operations()[0].value(),
            Some(&json!({"nick": "j"}))
        );
    }

    #[test]
    fn test_input_is_not_mutated_and_order_kept() {
        let input = patch(json!([
            {"op": "remove", "path": "/c"},
            {"op": "remove", "path": "/bag"},
            {"op": "remove", "path": "/a"}
        ]));
        let before = input.clone();
        let out = sanitize(&input, &pointers(&["/bag"]));
        assert_eq!(input, before);
        let paths: Vec<String> = out.iter().map(|o| o.path().to_string()).collect();
        assert_eq!(paths, ["/c", "/a"]);
    }

    #[test]
    fn test_root_exclusion_drops_everything() {
        let input = patch(json!([{"op": "replace", "path": "/a", "value": 1}]));
        assert!(sanitize(&input, &[JsonPointer::root()]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let input = patch(json!([
            {"op": "replace", "path": "", "value": {"bag": {"phone": "1"}, "x": 1}},
            {"op": "remove", "path": "/bag/phone"}
        ]));
        let excluded = pointers(&["/bag"]);
        let once = sanitize(&input, &excluded);
        assert_eq!(sanitize(&once, &excluded), once);
    }
}
