/// Position of an element within an array.
pub type Index = usize;

/// One step on the way from the root to a node of a [`Value`](crate::Value)
/// tree: a member key for objects or a position for arrays.
///
/// Components borrow their keys from the tree they describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathComponent<'a> {
    /// Member key of an object.
    Key(&'a str),
    /// Element position in an array.
    Index(Index),
}

impl<'a> From<&'a str> for PathComponent<'a> {
    fn from(s: &'a str) -> Self {
        Self::Key(s)
    }
}

impl From<Index> for PathComponent<'_> {
    fn from(i: Index) -> Self {
        Self::Index(i)
    }
}

/// Conversion used by [`path!`](crate::path) for each of its elements.
#[doc(hidden)]
pub trait PathComponentFrom<'a, T> {
    /// Converts `value` into a component.
    fn from_path_component(value: T) -> PathComponent<'a>;
}

// Integer literals in `path![...]` default to `i32`, so signed types convert
// too; a negative index panics instead of wrapping around.
macro_rules! impl_integer_as_path_component {
    ($($t:ty),+) => {
        $(
            impl<'a> PathComponentFrom<'a, $t> for PathComponent<'a> {
                fn from_path_component(value: $t) -> Self {
                    match Index::try_from(value) {
                        Ok(index) => PathComponent::Index(index),
                        Err(_) => panic!("path index {value} is not a valid array position"),
                    }
                }
            }
        )+
    };
}
impl_integer_as_path_component!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl<'a> PathComponentFrom<'a, &'a str> for PathComponent<'a> {
    fn from_path_component(value: &'a str) -> Self {
        PathComponent::Key(value)
    }
}

impl<'a> PathComponent<'a> {
    /// Returns the index if this component is an index, otherwise `None`.
    #[must_use]
    pub fn as_index(&self) -> Option<Index> {
        if let Self::Index(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Returns the key if this component is a key, otherwise `None`.
    #[must_use]
    pub fn as_key(&self) -> Option<&'a str> {
        if let Self::Key(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl core::fmt::Display for PathComponent<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Key(k) => {
                f.write_str(".")?;
                crate::value::write_escaped_string(k, f)
            }
            Self::Index(i) => write!(f, "[{i}]"),
        }
    }
}

// A path serializes as e.g. `["foo", 0, "bar"]` rather than the default
// tagged representation.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use serde::{Serialize, Serializer};

    use super::PathComponent;

    impl Serialize for PathComponent<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                PathComponent::Key(k) => serializer.serialize_str(k),
                PathComponent::Index(i) => serializer.collect_str(i),
            }
        }
    }
}

/// Builds a `Vec<PathComponent>` from a mixed list of keys and indices.
///
/// # Panics
///
/// Panics if an index is negative or does not fit in a `usize`.
///
/// ```rust
/// use jsonpull::{PathComponent, path};
///
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         PathComponent::Index(0),
///         PathComponent::Key("foo"),
///         PathComponent::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::PathComponentFrom;
        $crate::vec![$($crate::PathComponent::from_path_component($elem)),*]
    }};
}
