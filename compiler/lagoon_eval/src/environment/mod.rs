//! Namespaces and scope chains.
//!
//! A [`ScopeChain`] is a stack of shared namespaces, builtins first. Calls
//! and comprehensions push a fresh namespace onto the chain captured by
//! the closure; the captured outer namespaces stay shared, so a closure
//! sees later writes to the scope it was defined in.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lagoon_ir::Ident;

use crate::errors::{self, EvalError};
use crate::value::Value;

/// One namespace: identifier to value.
pub type Namespace = FxHashMap<Ident, Value>;

/// A single-threaded shared handle with interior mutability.
///
/// All scope allocations go through [`LocalScope::new`]. The wrapper is
/// `Rc`-based and therefore not `Send`; the interpreter never crosses
/// threads.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same namespace.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Namespaces from outermost (builtins) to innermost.
#[derive(Clone, Default)]
pub struct ScopeChain {
    frames: Vec<LocalScope<Namespace>>,
}

impl ScopeChain {
    /// A root chain: the builtin namespace plus an empty global namespace.
    pub fn root(builtins: Namespace) -> Self {
        ScopeChain {
            frames: vec![LocalScope::new(builtins), LocalScope::default()],
        }
    }

    /// This chain with `frame` pushed as the new innermost namespace.
    #[must_use]
    pub fn with_frame(&self, frame: Namespace) -> Self {
        let mut frames = self.frames.clone();
        frames.push(LocalScope::new(frame));
        ScopeChain { frames }
    }

    /// First binding of `name`, scanning innermost to outermost.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.borrow().get(name).cloned())
    }

    /// Like [`lookup`](Self::lookup), but a miss is a NameError.
    pub fn resolve(&self, name: &str) -> Result<Value, EvalError> {
        self.lookup(name).ok_or_else(|| errors::undefined_name(name))
    }

    /// Binds `name` in the innermost namespace.
    pub fn assign(&self, name: Ident, value: Value) {
        if let Some(frame) = self.frames.last() {
            frame.borrow_mut().insert(name, value);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames
            .iter()
            .any(|frame| frame.borrow().contains_key(name))
    }

    pub fn innermost(&self) -> Option<&LocalScope<Namespace>> {
        self.frames.last()
    }

    /// Number of namespaces in the chain.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Merged view, inner bindings shadowing outer ones.
    pub fn flatten(&self) -> Namespace {
        let mut merged = Namespace::default();
        for frame in &self.frames {
            for (name, value) in frame.borrow().iter() {
                merged.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    /// Bindings of the innermost namespace only, sorted by name.
    pub fn local_bindings(&self) -> Vec<(Ident, Value)> {
        let mut bindings: Vec<(Ident, Value)> = self
            .innermost()
            .map(|frame| {
                frame
                    .borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default();
        bindings.sort_by(|a, b| a.0.cmp(&b.0));
        bindings
    }
}

impl fmt::Debug for ScopeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeChain")
            .field("depth", &self.frames.len())
            .finish_non_exhaustive()
    }
}
