//! Argument extraction for tools invoked with untyped JSON

use serde_json::{Map, Value};

/// A single argument looked up from a JSON object
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Arg<T> {
    /// Key absent or `null`
    Missing,
    /// Present but of the wrong JSON type
    WrongType,
    Present(T),
}

impl<T> Arg<T> {
    /// Substitute `default` for a missing argument; `None` on a type mismatch
    pub fn or_default(self, default: T) -> Option<T> {
        match self {
            Arg::Missing => Some(default),
            Arg::WrongType => None,
            Arg::Present(value) => Some(value),
        }
    }
}

/// View over a tool's JSON arguments
///
/// Anything other than a JSON object is treated as "no arguments".
pub(crate) struct Args<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Args<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|m| m.get(key)).filter(|v| !v.is_null())
    }

    /// The argument exactly as supplied, `null` when absent
    pub fn raw(&self, key: &str) -> Value {
        self.lookup(key).cloned().unwrap_or(Value::Null)
    }

    /// The argument as supplied, or `default` when absent
    pub fn raw_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.lookup(key).cloned().unwrap_or_else(|| default.into())
    }

    pub fn str(&self, key: &str) -> Arg<&'a str> {
        match self.lookup(key) {
            None => Arg::Missing,
            Some(Value::String(s)) => Arg::Present(s.as_str()),
            Some(_) => Arg::WrongType,
        }
    }

    /// Integer argument; floats and numeric strings are type mismatches
    pub fn int(&self, key: &str) -> Arg<i64> {
        match self.lookup(key) {
            None => Arg::Missing,
            Some(v) => v.as_i64().map(Arg::Present).unwrap_or(Arg::WrongType),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_str_lookup() {
        let value = json!({"city": "Paris", "count": 2, "empty": null});
        let args = Args::new(&value);
        assert_eq!(args.str("city"), Arg::Present("Paris"));
        assert_eq!(args.str("count"), Arg::WrongType);
        assert_eq!(args.str("empty"), Arg::Missing);
        assert_eq!(args.str("absent"), Arg::Missing);
    }

    #[test]
    fn test_int_rejects_floats_and_strings() {
        let value = json!({"a": 3, "b": 3.5, "c": "3", "d": true});
        let args = Args::new(&value);
        assert_eq!(args.int("a"), Arg::Present(3));
        assert_eq!(args.int("b"), Arg::WrongType);
        assert_eq!(args.int("c"), Arg::WrongType);
        assert_eq!(args.int("d"), Arg::WrongType);
    }

    #[test]
    fn test_non_object_means_no_arguments() {
        let value = json!(["Paris"]);
        let args = Args::new(&value);
        assert_eq!(args.str("city"), Arg::Missing);
        assert_eq!(args.raw("city"), Value::Null);
        assert_eq!(args.raw_or("count", 1), json!(1));
    }

    #[test]
    fn test_or_default() {
        assert_eq!(Arg::<i64>::Missing.or_default(1), Some(1));
        assert_eq!(Arg::Present(4).or_default(1), Some(4));
        assert_eq!(Arg::<i64>::WrongType.or_default(1), None);
    }
}
