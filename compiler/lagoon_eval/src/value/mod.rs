//! Runtime values.
//!
//! Immediate values (`None`, `Bool`, `Int`, `Float`, `Range`) are stored
//! inline; everything else is a shared handle, so cloning a [`Value`] never
//! copies a container. Mutable containers use `RefCell` since the
//! interpreter is single-threaded.

pub mod display;
mod exception;
mod function;
mod generator;
mod key;
mod module;
mod range;
mod table;
mod types;

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use regex::Regex;

pub use exception::ExceptionValue;
pub use function::{
    Args, BoundFunction, CodeUnit, FunctionValue, MethodValue, NativeFn, NativeFunction,
};
pub use generator::{ComprehensionBody, Generator, GeneratorState, ValueIter};
pub use key::{Key, ValueMap, ValueSet};
pub use module::ModuleValue;
pub use range::RangeValue;
pub use table::{Table, METATABLE, PARENT};
pub use types::BuiltinType;

use crate::errors::{self, EvalError, ExceptionKind};

/// A Lagoon value.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Bytes(Rc<[u8]>),
    Pattern(Rc<Regex>),

    List(Rc<RefCell<Vec<Value>>>),
    Tuple(Rc<[Value]>),
    Set(Rc<RefCell<ValueSet>>),
    FrozenSet(Rc<ValueSet>),
    Dict(Rc<RefCell<ValueMap>>),
    OrderedDict(Rc<RefCell<ValueMap>>),
    Range(RangeValue),
    Generator(Rc<Generator>),

    Table(Rc<Table>),
    Function(Rc<FunctionValue>),
    /// A closure fetched as an attribute, remembering its owner as `current`.
    Bound(Rc<BoundFunction>),
    Native(Rc<NativeFunction>),
    /// A builtin method bound to its receiver, e.g. `xs.append`.
    Method(Rc<MethodValue>),

    Type(BuiltinType),
    ExceptionType(ExceptionKind),
    Exception(Rc<ExceptionValue>),
    Module(Rc<ModuleValue>),
}

impl Value {
    // Factories

    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn bytes(b: impl Into<Rc<[u8]>>) -> Self {
        Value::Bytes(b.into())
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(items.into())
    }

    pub fn set(items: ValueSet) -> Self {
        Value::Set(Rc::new(RefCell::new(items)))
    }

    pub fn frozen_set(items: ValueSet) -> Self {
        Value::FrozenSet(Rc::new(items))
    }

    pub fn dict(items: ValueMap) -> Self {
        Value::Dict(Rc::new(RefCell::new(items)))
    }

    pub fn ordered_dict(items: ValueMap) -> Self {
        Value::OrderedDict(Rc::new(RefCell::new(items)))
    }

    pub fn table(table: Table) -> Self {
        Value::Table(Rc::new(table))
    }

    pub fn native(name: &'static str, func: NativeFn) -> Self {
        Value::Native(Rc::new(NativeFunction { name, func }))
    }

    pub fn exception(exception: ExceptionValue) -> Self {
        Value::Exception(Rc::new(exception))
    }

    pub fn module(module: ModuleValue) -> Self {
        Value::Module(Rc::new(module))
    }

    pub fn generator(state: GeneratorState) -> Self {
        Value::Generator(Rc::new(Generator::new(state)))
    }

    // Queries

    /// Runtime type name as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Pattern(_) => "pattern",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::FrozenSet(_) => "frozenset",
            Value::Dict(_) => "dict",
            Value::OrderedDict(_) => "ordereddict",
            Value::Range(_) => "range",
            Value::Generator(_) => "generator",
            Value::Table(_) => "table",
            Value::Function(_) | Value::Bound(_) => "function",
            Value::Native(_) | Value::Method(_) => "builtin",
            Value::Type(_) | Value::ExceptionType(_) => "type",
            Value::Exception(e) => e.kind.name(),
            Value::Module(_) => "module",
        }
    }

    /// Builtin type of this value, as reported by `type(x)`.
    pub fn builtin_type(&self) -> BuiltinType {
        BuiltinType::of(self)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::List(items) => !items.borrow().is_empty(),
            Value::Tuple(items) => !items.is_empty(),
            Value::Set(items) => !items.borrow().is_empty(),
            Value::FrozenSet(items) => !items.is_empty(),
            Value::Dict(map) | Value::OrderedDict(map) => !map.borrow().is_empty(),
            Value::Range(r) => r.len() > 0,
            _ => true,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Function(_)
                | Value::Bound(_)
                | Value::Native(_)
                | Value::Method(_)
                | Value::Type(_)
                | Value::ExceptionType(_)
        )
    }

    /// Integer view of ints and bools.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Float view of any number.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Bool(_))
    }

    /// Elements of a sized collection, in iteration order.
    ///
    /// Generators and other lazy values have no known size and yield `None`.
    pub fn sized_items(&self) -> Option<Vec<Value>> {
        Some(match self {
            Value::List(items) => items.borrow().clone(),
            Value::Tuple(items) => items.to_vec(),
            Value::Str(s) => s.chars().map(|c| Value::str(c.to_string())).collect(),
            Value::Bytes(b) => b.iter().map(|byte| Value::Int(i64::from(*byte))).collect(),
            Value::Range(r) => r.iter().map(Value::Int).collect(),
            Value::Set(items) => items.borrow().iter().map(Key::to_value).collect(),
            Value::FrozenSet(items) => items.iter().map(Key::to_value).collect(),
            Value::Dict(map) | Value::OrderedDict(map) => {
                map.borrow().keys().map(Key::to_value).collect()
            }
            _ => return None,
        })
    }

    /// Length of a value [`Value::sized_items`] accepts, without building
    /// its elements.
    pub fn sized_len(&self) -> Option<usize> {
        match self {
            Value::List(_)
            | Value::Tuple(_)
            | Value::Str(_)
            | Value::Bytes(_)
            | Value::Range(_)
            | Value::Set(_)
            | Value::FrozenSet(_)
            | Value::Dict(_)
            | Value::OrderedDict(_) => self.len().ok(),
            _ => None,
        }
    }

    /// Number of elements, for values that have a length.
    pub fn len(&self) -> Result<usize, EvalError> {
        Ok(match self {
            Value::Str(s) => s.chars().count(),
            Value::Bytes(b) => b.len(),
            Value::List(items) => items.borrow().len(),
            Value::Tuple(items) => items.len(),
            Value::Set(items) => items.borrow().len(),
            Value::FrozenSet(items) => items.len(),
            Value::Dict(map) | Value::OrderedDict(map) => map.borrow().len(),
            Value::Range(r) => r.len(),
            Value::Module(m) => m.len(),
            other => return Err(errors::no_len(other.type_name())),
        })
    }

    /// Reference identity (`is`). Immediate values compare by value.
    pub fn is_identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Range(a), Value::Range(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::Bytes(a), Value::Bytes(b)) => Rc::ptr_eq(a, b),
            (Value::Pattern(a), Value::Pattern(b)) => Rc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Tuple(a), Value::Tuple(b)) => Rc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Rc::ptr_eq(a, b),
            (Value::FrozenSet(a), Value::FrozenSet(b)) => Rc::ptr_eq(a, b),
            (Value::Dict(a), Value::Dict(b)) | (Value::OrderedDict(a), Value::OrderedDict(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Generator(a), Value::Generator(b)) => Rc::ptr_eq(a, b),
            (Value::Table(a), Value::Table(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Bound(a), Value::Bound(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            (Value::Method(a), Value::Method(b)) => Rc::ptr_eq(a, b),
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::ExceptionType(a), Value::ExceptionType(b)) => a == b,
            (Value::Exception(a), Value::Exception(b)) => Rc::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Structural equality (`==`). Numbers compare across int, float and bool.
    pub fn equals(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (self.number(), other.number()) {
            return a.equals(b);
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Pattern(a), Value::Pattern(b)) => a.as_str() == b.as_str(),
            (Value::List(a), Value::List(b)) => {
                Rc::ptr_eq(a, b) || seq_equals(&a.borrow(), &b.borrow())
            }
            (Value::Tuple(a), Value::Tuple(b)) => seq_equals(a, b),
            (Value::Set(a), Value::Set(b)) => set_equals(&a.borrow(), &b.borrow()),
            (Value::FrozenSet(a), Value::FrozenSet(b)) => set_equals(a, b),
            (Value::Set(a), Value::FrozenSet(b)) | (Value::FrozenSet(b), Value::Set(a)) => {
                set_equals(&a.borrow(), b)
            }
            (Value::OrderedDict(a), Value::OrderedDict(b)) => {
                Rc::ptr_eq(a, b) || {
                    let (a, b) = (a.borrow(), b.borrow());
                    a.len() == b.len()
                        && a.iter()
                            .zip(b.iter())
                            .all(|((ka, va), (kb, vb))| ka == kb && va.equals(vb))
                }
            }
            (Value::Dict(a) | Value::OrderedDict(a), Value::Dict(b) | Value::OrderedDict(b)) => {
                Rc::ptr_eq(a, b) || map_equals(&a.borrow(), &b.borrow())
            }
            (Value::Range(a), Value::Range(b)) => a.same_elements(b),
            (Value::Exception(a), Value::Exception(b)) => Rc::ptr_eq(a, b),
            _ => self.is_identical(other),
        }
    }

    /// Ordering for `<`, `<=`, `>`, `>=`; `None` when the values are
    /// unordered (NaN).
    pub fn compare(&self, other: &Value, op: &str) -> Result<Option<Ordering>, EvalError> {
        if let (Some(a), Some(b)) = (self.number(), other.number()) {
            return Ok(a.compare(b));
        }
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(Some(a.cmp(b))),
            (Value::Bytes(a), Value::Bytes(b)) => Ok(Some(a.cmp(b))),
            (Value::List(a), Value::List(b)) => seq_compare(&a.borrow(), &b.borrow(), op),
            (Value::Tuple(a), Value::Tuple(b)) => seq_compare(a, b, op),
            _ => Err(errors::unsupported_binary(
                op,
                self.type_name(),
                other.type_name(),
            )),
        }
    }

    fn number(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

#[derive(Copy, Clone)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn equals(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Int(i), Number::Float(f)) | (Number::Float(f), Number::Int(i)) => {
                f.fract() == 0.0 && f == i as f64 && f.is_finite()
            }
        }
    }

    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Int(a), Number::Float(b)) => (a as f64).partial_cmp(&b),
            (Number::Float(a), Number::Int(b)) => a.partial_cmp(&(b as f64)),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
        }
    }
}

fn seq_equals(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.equals(y))
}

fn set_equals(a: &ValueSet, b: &ValueSet) -> bool {
    a.len() == b.len() && a.iter().all(|k| b.contains(k))
}

fn map_equals(a: &ValueMap, b: &ValueMap) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(k, v)| b.get(k).is_some_and(|other| v.equals(other)))
}

fn seq_compare(a: &[Value], b: &[Value], op: &str) -> Result<Option<Ordering>, EvalError> {
    for (x, y) in a.iter().zip(b) {
        if !x.equals(y) {
            return x.compare(y, op);
        }
    }
    Ok(Some(a.len().cmp(&b.len())))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display::repr(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display::display(self))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

#[cfg(test)]
mod tests;
