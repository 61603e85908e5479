use std::collections::BTreeMap;

/// A typed value held in the [`Parsed`] mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Produced by `param::flag`.
    Flag(bool),
    /// Produced by the string, enum and positional string matchers.
    Text(String),
    /// Produced by `param::integer`.
    Integer(i64),
    /// Produced by the list matchers; one element per captured value.
    List(Vec<Value>),
}

impl Value {
    /// The boolean, if this is a `Value::Flag`.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// The string slice, if this is a `Value::Text`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The integer, if this is a `Value::Integer`.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The elements, if this is a `Value::List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Flag(value) => write!(f, "{value}"),
            Value::Text(value) => write!(f, "{value}"),
            Value::Integer(value) => write!(f, "{value}"),
            Value::List(values) => {
                let items: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Flag(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// The parsed mapping: parameter name to its typed [`Value`].
///
/// A `Parsed` is never mutated in place during a parse.
/// Each matching step produces a new mapping from the previous one with exactly one name added or replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    values: BTreeMap<String, Value>,
}

impl Parsed {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merge `name = value` into a copy of this mapping.
    ///
    /// ### Example
    /// ```
    /// # use argchain_builder as argchain;
    /// use argchain::Parsed;
    ///
    /// let before = Parsed::new();
    /// let after = before.with("verbose", true);
    /// assert!(before.is_empty());
    /// assert_eq!(after.flag("verbose"), Some(true));
    /// ```
    pub fn with(&self, name: impl Into<String>, value: impl Into<Value>) -> Parsed {
        let mut values = self.values.clone();
        values.insert(name.into(), value.into());
        Parsed { values }
    }

    /// Copy this mapping, extending the list under `name` with `items`.
    // A scalar already stored under the same name becomes the first list element.
    pub(crate) fn appended(&self, name: &str, items: Vec<Value>) -> Parsed {
        let mut list = match self.values.get(name) {
            Some(Value::List(existing)) => existing.clone(),
            Some(scalar) => vec![scalar.clone()],
            None => Vec::with_capacity(items.len()),
        };
        list.extend(items);
        self.with(name, Value::List(list))
    }

    /// Get the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether a value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The number of names in this mapping.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing has been parsed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the `(name, value)` pairs, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The flag under `name`, if set.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_flag)
    }

    /// The string under `name`, if set.
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// The integer under `name`, if set.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    /// The list under `name`, if set.
    pub fn list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// The list of strings under `name`, if set.
    /// Non-string elements are skipped.
    pub fn strings(&self, name: &str) -> Option<Vec<&str>> {
        self.list(name)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Value); N]> for Parsed {
    fn from(pairs: [(K, Value); N]) -> Self {
        Parsed {
            values: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
