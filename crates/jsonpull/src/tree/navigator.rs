use alloc::{collections::btree_map, string::String, vec::Vec};
use core::{iter::Enumerate, slice};

use crate::{path_component::PathComponent, value::Value};

/// Decides which containers a [`visit`] descends into.
///
/// Only arrays and objects are offered; scalars have no children to visit.
pub trait TreeNavigator {
    /// Called for each container `child` of `parent`, reached through `key`.
    /// Returning `false` skips the child's subtree; its siblings are still
    /// offered.
    fn accept(&mut self, parent: &Value, child: &Value, key: PathComponent<'_>) -> bool;
}

impl<F> TreeNavigator for F
where
    F: FnMut(&Value, &Value, PathComponent<'_>) -> bool,
{
    fn accept(&mut self, parent: &Value, child: &Value, key: PathComponent<'_>) -> bool {
        self(parent, child, key)
    }
}

enum Children<'a> {
    Array(Enumerate<slice::Iter<'a, Value>>),
    Object(btree_map::Iter<'a, String, Value>),
    None,
}

impl<'a> Children<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => Self::Array(items.iter().enumerate()),
            Value::Object(members) => Self::Object(members.iter()),
            _ => Self::None,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = (PathComponent<'a>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Array(items) => items.next().map(|(i, v)| (PathComponent::Index(i), v)),
            Self::Object(members) => members
                .next()
                .map(|(k, v)| (PathComponent::Key(k.as_str()), v)),
            Self::None => None,
        }
    }
}

/// Depth-first walk below `root`: array elements in order, object members
/// in key order.
///
/// ```
/// use jsonpull::{JsonTree, PathComponent, Value, visit};
///
/// let tree = JsonTree::from_slice(br#"{"a": [[1], {"b": []}], "c": {}}"#).unwrap();
/// let mut seen = Vec::new();
/// visit(tree.root().unwrap(), &mut |_: &Value, _: &Value, key: PathComponent<'_>| {
///     seen.push(key.to_string());
///     key != PathComponent::Index(1)
/// });
/// assert_eq!(seen, [".a", "[0]", "[1]", ".c"]);
/// ```
pub fn visit<N: TreeNavigator + ?Sized>(root: &Value, navigator: &mut N) {
    let mut stack = Vec::new();
    stack.push((root, Children::of(root)));
    while let Some((parent, children)) = stack.last_mut() {
        let parent = *parent;
        match children.next() {
            Some((key, child)) if child.is_container() => {
                if navigator.accept(parent, child, key) {
                    stack.push((child, Children::of(child)));
                }
            }
            Some(_) => {}
            None => {
                stack.pop();
            }
        }
    }
}
