#![expect(missing_docs)]

mod common;

use std::{cell::RefCell, rc::Rc};

use jsonpull::{
    JsonTree, ListenerRegistry, Map, PathComponent, StagingBuffer, Tokenizer, TreeChangeListener,
    TreeError, Value, chunk_utils::produce_chunks, path,
};
use rstest::rstest;

fn from_serde(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Double(n.as_f64().unwrap()),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_serde).collect()),
        serde_json::Value::Object(members) => Value::Object(
            members
                .into_iter()
                .map(|(k, v)| (k, from_serde(v)))
                .collect::<Map>(),
        ),
    }
}

#[rstest]
#[case::original(common::ORIGINAL)]
#[case::empty_array("[]")]
#[case::empty_object(" {} ")]
#[case::numbers("[0, -7, 1.5, -2e3, 6.02E+23, 1e-7, 9223372036854775807, -9223372036854775808]")]
#[case::escapes(r#"{"A\n": "😀 é \/ \\ \"", "": ""}"#)]
#[case::nested(r#"[[[[{"a": [{"b": {"c": [null]}}]}]]]]"#)]
#[case::mixed(r#"{"z": 1, "a": [true, false, null], "m": {"k": "v"}}"#)]
fn tree_agrees_with_serde_json(#[case] input: &str) {
    let expected = from_serde(serde_json::from_str(input).unwrap());

    let whole = JsonTree::from_slice(input.as_bytes()).unwrap();
    assert_eq!(whole.root(), Some(&expected));

    for parts in [2, 5, 17] {
        let chunks = produce_chunks(input.as_bytes(), parts);
        let mut tokenizer = Tokenizer::new(StagingBuffer::with_capacity(4));
        let split = JsonTree::parse_chunks(&mut tokenizer, chunks.iter().copied()).unwrap();
        assert_eq!(split.root(), Some(&expected), "{parts} parts");
    }
}

#[test]
fn display_reparses_to_the_same_tree() {
    let tree = JsonTree::from_slice(common::ORIGINAL.as_bytes()).unwrap();
    let printed = tree.root().unwrap().to_string();
    let reparsed = JsonTree::from_slice(printed.as_bytes()).unwrap();
    assert_eq!(reparsed.root(), tree.root());

    let oracle: serde_json::Value = serde_json::from_str(&printed).unwrap();
    assert_eq!(Some(&from_serde(oracle)), tree.root());
}

#[rstest]
#[case::int("42", jsonpull::Event::ValueInt)]
#[case::double("-0.5", jsonpull::Event::ValueDouble)]
#[case::string(r#""s""#, jsonpull::Event::ValueString)]
#[case::null("null", jsonpull::Event::ValueNull)]
#[case::bool("true", jsonpull::Event::ValueTrue)]
fn scalar_documents_are_rejected(#[case] input: &str, #[case] found: jsonpull::Event) {
    assert_eq!(
        JsonTree::from_slice(input.as_bytes()).unwrap_err(),
        TreeError::NotAContainer(found)
    );
}

#[test]
fn syntax_errors_carry_their_position() {
    let Err(TreeError::Parser(error)) = JsonTree::from_slice(b"{\n  \"a\": [1,,2]\n}") else {
        panic!("expected a parser error");
    };
    assert_eq!((error.line, error.column), (2, 11));
    assert_eq!(JsonTree::from_slice(b"  ").unwrap_err().to_string(), "unexpected end of input at 1:3");
}

#[test]
fn visitor_walks_containers_depth_first() {
    let tree = JsonTree::from_slice(common::ORIGINAL.as_bytes()).unwrap();
    let mut seen = Vec::new();
    tree.visit(&mut |parent: &Value, child: &Value, key: PathComponent<'_>| {
        seen.push((key.to_string(), parent.is_array(), child.is_array()));
        true
    });
    assert_eq!(
        seen,
        [
            (".grid".to_string(), false, true),
            ("[0]".to_string(), true, true),
            ("[1]".to_string(), true, true),
            (".meta".to_string(), false, false),
            (".notes".to_string(), false, true),
            (".readings".to_string(), false, true),
            (".sensor".to_string(), false, false),
        ]
    );
}

#[derive(Default)]
struct Journal(RefCell<Vec<String>>);

impl TreeChangeListener for Journal {
    fn on_tree_change(&self, tree: &Value, path: &[PathComponent<'_>]) {
        let mut node = Some(tree);
        for component in path {
            node = node.and_then(|n| match component {
                PathComponent::Key(key) => n.get(key),
                PathComponent::Index(index) => n.get_index(*index),
            });
        }
        let rendered: String = path.iter().map(ToString::to_string).collect();
        self.0
            .borrow_mut()
            .push(format!("{rendered} = {}", node.map_or("?".into(), ToString::to_string)));
    }
}

#[test]
fn listeners_see_edits_through_the_tree() {
    let registry = Rc::new(ListenerRegistry::new());
    let journal = Rc::new(Journal::default());
    assert!(registry.register(journal.clone()));

    let mut tree = JsonTree::from_slice(common::ORIGINAL.as_bytes())
        .unwrap()
        .with_registry(Rc::clone(&registry));

    if let Some(Value::Object(root)) = tree.root_mut() {
        root.insert("meta".into(), Value::from(vec![Value::from("edited")]));
    }
    tree.notify_change(&path!["meta", 0]);
    tree.notify_change(&path!["readings", 2]);

    let as_listener: Rc<dyn TreeChangeListener> = journal.clone();
    assert!(registry.unregister(&as_listener));
    tree.notify_change(&path!["sensor"]);

    assert_eq!(*journal.0.borrow(), [".meta[0] = \"edited\"", ".readings[2] = 0.25"]);
}

#[test]
fn replacing_the_root_requires_a_container() {
    let mut tree = JsonTree::new();
    assert!(tree.is_empty());
    assert_eq!(
        tree.set_root(Value::from("scalar")),
        Err(TreeError::NotAContainer(jsonpull::Event::ValueString))
    );
    assert_eq!(tree.set_root(Value::Array(Vec::new())), Ok(None));
    assert_eq!(
        tree.set_root(Value::Object(Map::new())),
        Ok(Some(Value::Array(Vec::new())))
    );
}
