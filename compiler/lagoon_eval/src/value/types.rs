//! Builtin types, as returned by `type(x)` and used as `isa` filters.

use super::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    Pattern,
    List,
    Tuple,
    Set,
    FrozenSet,
    Dict,
    OrderedDict,
    Range,
    Generator,
    Table,
    Function,
    Builtin,
    Type,
    Exception,
    Module,
}

impl BuiltinType {
    /// Name used when displaying the type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoneType => "none",
            Self::Bool => "bool",
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Str => "Str",
            Self::Bytes => "Bytes",
            Self::Pattern => "Pattern",
            Self::List => "List",
            Self::Tuple => "Tuple",
            Self::Set => "Set",
            Self::FrozenSet => "FrozenSet",
            Self::Dict => "Dict",
            Self::OrderedDict => "OrderedDict",
            Self::Range => "range",
            Self::Generator => "generator",
            Self::Table => "Table",
            Self::Function => "function",
            Self::Builtin => "builtin",
            Self::Type => "type",
            Self::Exception => "exception",
            Self::Module => "module",
        }
    }

    /// Runtime type of a value. `type(e)` of an exception object reports
    /// its exception kind instead.
    pub fn of(value: &Value) -> BuiltinType {
        match value {
            Value::None => Self::NoneType,
            Value::Bool(_) => Self::Bool,
            Value::Int(_) => Self::Int,
            Value::Float(_) => Self::Float,
            Value::Str(_) => Self::Str,
            Value::Bytes(_) => Self::Bytes,
            Value::Pattern(_) => Self::Pattern,
            Value::List(_) => Self::List,
            Value::Tuple(_) => Self::Tuple,
            Value::Set(_) => Self::Set,
            Value::FrozenSet(_) => Self::FrozenSet,
            Value::Dict(_) => Self::Dict,
            Value::OrderedDict(_) => Self::OrderedDict,
            Value::Range(_) => Self::Range,
            Value::Generator(_) => Self::Generator,
            Value::Table(_) => Self::Table,
            Value::Function(_) | Value::Bound(_) => Self::Function,
            Value::Native(_) | Value::Method(_) => Self::Builtin,
            Value::Type(_) | Value::ExceptionType(_) => Self::Type,
            Value::Exception(_) => Self::Exception,
            Value::Module(_) => Self::Module,
        }
    }

    /// `value isa self`. Bools count as ints.
    pub fn is_instance(self, value: &Value) -> bool {
        let actual = Self::of(value);
        actual == self || (self == Self::Int && actual == Self::Bool)
    }
}
