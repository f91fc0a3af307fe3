//! Hashable wrapper for set elements and mapping keys.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHasher};

use super::Value;
use crate::errors::{self, EvalError};

/// Insertion-ordered mapping used by dicts and ordered dicts.
pub type ValueMap = IndexMap<Key, Value, FxBuildHasher>;

/// Insertion-ordered set used by sets and frozen sets.
pub type ValueSet = IndexSet<Key, FxBuildHasher>;

/// A value checked to be hashable.
///
/// Equality is [`Value::equals`], so `1`, `1.0` and `true` are the same
/// key; hashing agrees with that.
#[derive(Clone)]
pub struct Key(Value);

impl Key {
    pub fn new(value: Value) -> Result<Key, EvalError> {
        check_hashable(&value)?;
        Ok(Key(value))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        self.0.clone()
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Hash as exposed by the `hash` builtin.
    pub fn hash_code(&self) -> i64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish() as i64
    }
}

fn check_hashable(value: &Value) -> Result<(), EvalError> {
    match value {
        Value::List(_) | Value::Set(_) | Value::Dict(_) | Value::OrderedDict(_) => {
            Err(errors::unhashable(value.type_name()))
        }
        Value::Tuple(items) => items.iter().try_for_each(check_hashable),
        _ => Ok(()),
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.equals(&other.0)
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(&self.0, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    match value {
        Value::None => 0u8.hash(state),
        Value::Bool(b) => i64::from(*b).hash(state),
        Value::Int(n) => n.hash(state),
        Value::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() && f.abs() < 9.2e18 {
                (*f as i64).hash(state);
            } else {
                f.to_bits().hash(state);
            }
        }
        Value::Str(s) => s.hash(state),
        Value::Bytes(b) => b.hash(state),
        Value::Pattern(p) => p.as_str().hash(state),
        Value::Tuple(items) => {
            items.len().hash(state);
            for item in items.iter() {
                hash_value(item, state);
            }
        }
        Value::FrozenSet(items) => {
            // Order-independent: combine element hashes commutatively.
            let combined = items.iter().fold(0u64, |acc, key| {
                let mut h = FxHasher::default();
                key.hash(&mut h);
                acc.wrapping_add(h.finish())
            });
            combined.hash(state);
        }
        Value::Range(r) => {
            r.len().hash(state);
            r.iter().next().hash(state);
        }
        Value::Type(t) => t.hash(state),
        Value::ExceptionType(k) => k.hash(state),
        Value::Table(t) => Rc::as_ptr(t).hash(state),
        Value::Function(f) => Rc::as_ptr(f).hash(state),
        Value::Bound(b) => Rc::as_ptr(b).hash(state),
        Value::Native(n) => Rc::as_ptr(n).hash(state),
        Value::Method(m) => Rc::as_ptr(m).hash(state),
        Value::Exception(e) => Rc::as_ptr(e).hash(state),
        Value::Module(m) => Rc::as_ptr(m).hash(state),
        Value::Generator(g) => Rc::as_ptr(g).hash(state),
        // Rejected by `check_hashable`.
        Value::List(_) | Value::Set(_) | Value::Dict(_) | Value::OrderedDict(_) => {}
    }
}
