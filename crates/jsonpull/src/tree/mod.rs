//! Building a [`Value`] tree from the tokenizer's event stream.
//!
//! [`JsonTree`] drives a [`Tokenizer`]: whenever it asks for more input, the
//! next slice of the caller's bytes is supplied, and once everything was
//! handed over the producer is marked done. Containers under construction
//! live on an explicit stack, so nesting is bounded by the tokenizer's depth
//! limit rather than by the call stack.
//!
//! ```
//! use jsonpull::{JsonTree, Value};
//!
//! let tree = JsonTree::from_slice(br#"{"xs": [1, 2.5, "three"]}"#).unwrap();
//! let xs = tree.root().and_then(|root| root.get("xs"));
//! assert_eq!(xs.and_then(|xs| xs.get_index(1)), Some(&Value::Double(2.5)));
//! ```

mod listener;
mod navigator;

use alloc::{rc::Rc, string::String, vec::Vec};

pub use listener::{ListenerRegistry, TreeChangeListener};
pub use navigator::{TreeNavigator, visit};

use crate::{
    error::{TreeError, ValueError},
    event::Event,
    path_component::PathComponent,
    staging::InputSource,
    tokenizer::Tokenizer,
    value::{Array, Map, Value},
};

/// A parsed document whose root is an array or an object.
#[derive(Default)]
pub struct JsonTree {
    root: Option<Value>,
    registry: Option<Rc<ListenerRegistry>>,
}

impl core::fmt::Debug for JsonTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("JsonTree")
            .field("root", &self.root)
            .field("listeners", &self.registry.as_ref().map_or(0, |r| r.len()))
            .finish()
    }
}

impl JsonTree {
    /// Creates a tree without a root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `input` with a fresh tokenizer using default options.
    ///
    /// # Errors
    ///
    /// See [`JsonTree::parse`].
    pub fn from_slice(input: &[u8]) -> Result<Self, TreeError> {
        Self::parse(&mut Tokenizer::default(), input)
    }

    /// Parses one document from `input`.
    ///
    /// The tokenizer must not have been fed yet; its producer is marked done
    /// after the last byte of `input`.
    ///
    /// # Errors
    ///
    /// [`TreeError::Parser`] for malformed input, [`TreeError::NotAContainer`]
    /// if the document is a bare scalar.
    pub fn parse<S: InputSource>(
        tokenizer: &mut Tokenizer<S>,
        input: &[u8],
    ) -> Result<Self, TreeError> {
        Self::parse_chunks(tokenizer, core::iter::once(input))
    }

    /// Parses one document arriving as a sequence of chunks.
    ///
    /// # Errors
    ///
    /// Same as [`JsonTree::parse`].
    pub fn parse_chunks<'a, S, I>(tokenizer: &mut Tokenizer<S>, chunks: I) -> Result<Self, TreeError>
    where
        S: InputSource,
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut chunks = chunks.into_iter();
        let mut pending: &[u8] = &[];
        let mut builder = Builder::default();

        let result = loop {
            match tokenizer.next_event() {
                Event::NeedMoreInput => {
                    while pending.is_empty() {
                        match chunks.next() {
                            Some(chunk) => pending = chunk,
                            None => break,
                        }
                    }
                    if pending.is_empty() {
                        tokenizer.finish();
                    } else {
                        let accepted = tokenizer.feed(pending);
                        pending = &pending[accepted..];
                    }
                }
                Event::EndOfInput => break builder.finish(),
                Event::Error => {
                    break match tokenizer.error() {
                        Some(error) => Err(TreeError::Parser(error.clone())),
                        None => Err(TreeError::EmptyDocument),
                    };
                }
                event => {
                    if let Err(error) = builder.apply(event, tokenizer) {
                        break Err(error);
                    }
                }
            }
        };

        match &result {
            Ok(_) => tracing::debug!(
                consumed = tokenizer.parsed_character_count(),
                "built document tree"
            ),
            Err(error) => tracing::debug!(%error, "failed to build document tree"),
        }
        result.map(|root| Self {
            root: Some(root),
            registry: None,
        })
    }

    /// Attaches a listener registry notified by [`notify_change`](Self::notify_change).
    #[must_use]
    pub fn with_registry(mut self, registry: Rc<ListenerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The attached listener registry, if any.
    #[must_use]
    pub fn registry(&self) -> Option<&Rc<ListenerRegistry>> {
        self.registry.as_ref()
    }

    /// The root container, `None` for a tree created with [`JsonTree::new`].
    #[must_use]
    pub fn root(&self) -> Option<&Value> {
        self.root.as_ref()
    }

    /// Mutable access to the root. Call [`notify_change`](Self::notify_change)
    /// after editing to inform listeners.
    pub fn root_mut(&mut self) -> Option<&mut Value> {
        self.root.as_mut()
    }

    /// Replaces the root.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotAContainer`] if `root` is neither an array nor an object;
    /// the tree is left unchanged.
    pub fn set_root(&mut self, root: Value) -> Result<Option<Value>, TreeError> {
        match &root {
            Value::Array(_) | Value::Object(_) => Ok(self.root.replace(root)),
            scalar => Err(TreeError::NotAContainer(scalar_event(scalar))),
        }
    }

    /// Consumes the tree, returning its root.
    #[must_use]
    pub fn into_root(self) -> Option<Value> {
        self.root
    }

    /// Returns `true` if the tree has no root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Walks the tree, offering each container below the root to `navigator`.
    pub fn visit<N: TreeNavigator + ?Sized>(&self, navigator: &mut N) {
        if let Some(root) = &self.root {
            visit(root, navigator);
        }
    }

    /// Marks the node at `path` as changed and notifies every listener of the
    /// attached registry.
    pub fn notify_change(&self, path: &[PathComponent<'_>]) {
        if let (Some(registry), Some(root)) = (&self.registry, &self.root) {
            registry.notify_all(root, path);
        }
    }
}

/// Container under construction.
#[derive(Debug)]
enum Frame {
    Array(Array),
    Object { members: Map, key: Option<String> },
}

#[derive(Debug, Default)]
struct Builder {
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl Builder {
    fn apply<S: InputSource>(
        &mut self,
        event: Event,
        tokenizer: &Tokenizer<S>,
    ) -> Result<(), TreeError> {
        let value = match event {
            Event::StartArray => {
                self.stack.push(Frame::Array(Array::new()));
                return Ok(());
            }
            Event::StartObject => {
                self.stack.push(Frame::Object {
                    members: Map::new(),
                    key: None,
                });
                return Ok(());
            }
            Event::FieldName => {
                let name = tokenizer.current_str()?;
                if let Some(Frame::Object { key, .. }) = self.stack.last_mut() {
                    *key = Some(name.into());
                }
                return Ok(());
            }
            Event::EndArray | Event::EndObject => match self.stack.pop() {
                Some(Frame::Array(items)) => Value::Array(items),
                Some(Frame::Object { members, .. }) => Value::Object(members),
                None => return Err(TreeError::EmptyDocument),
            },
            Event::ValueString => Value::String(tokenizer.current_str()?.into()),
            Event::ValueInt => match tokenizer.current_int() {
                Ok(n) => Value::Int(n),
                Err(ValueError::IntegerOverflow) => Value::Double(tokenizer.current_double()?),
                Err(error) => return Err(error.into()),
            },
            Event::ValueDouble => Value::Double(tokenizer.current_double()?),
            Event::ValueTrue => Value::Bool(true),
            Event::ValueFalse => Value::Bool(false),
            Event::ValueNull => Value::Null,
            Event::NeedMoreInput | Event::EndOfInput | Event::Error => return Ok(()),
        };
        self.attach(value, event)
    }

    fn attach(&mut self, value: Value, event: Event) -> Result<(), TreeError> {
        match self.stack.last_mut() {
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object { members, key }) => {
                // Later duplicates replace earlier members.
                members.insert(key.take().unwrap_or_default(), value);
            }
            None if value.is_container() => self.root = Some(value),
            None => return Err(TreeError::NotAContainer(event)),
        }
        Ok(())
    }

    fn finish(self) -> Result<Value, TreeError> {
        self.root.ok_or(TreeError::EmptyDocument)
    }
}

fn scalar_event(value: &Value) -> Event {
    match value {
        Value::Null => Event::ValueNull,
        Value::Bool(true) => Event::ValueTrue,
        Value::Bool(false) => Event::ValueFalse,
        Value::Int(_) => Event::ValueInt,
        Value::Double(_) => Event::ValueDouble,
        Value::String(_) => Event::ValueString,
        Value::Array(_) => Event::StartArray,
        Value::Object(_) => Event::StartObject,
    }
}
