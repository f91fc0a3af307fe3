//! Modules: host modules from `import` and script namespaces from `load`.

use std::cell::RefCell;

use indexmap::IndexMap;
use lagoon_ir::Ident;
use rustc_hash::FxBuildHasher;

use super::Value;

pub struct ModuleValue {
    pub name: Ident,
    members: RefCell<IndexMap<Ident, Value, FxBuildHasher>>,
}

impl ModuleValue {
    pub fn new(name: impl Into<Ident>) -> Self {
        ModuleValue {
            name: name.into(),
            members: RefCell::default(),
        }
    }

    #[must_use]
    pub fn with(self, name: &str, value: Value) -> Self {
        self.set(Ident::from(name), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.members.borrow().get(name).cloned()
    }

    pub fn set(&self, name: Ident, value: Value) {
        self.members.borrow_mut().insert(name, value);
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        self.members.borrow_mut().shift_remove(name)
    }

    /// Members in definition order.
    pub fn members(&self) -> Vec<(Ident, Value)> {
        self.members
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }
}
