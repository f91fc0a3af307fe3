//! Table storage.
//!
//! A table owns its attribute slots in insertion order. The `parent` link
//! holds its owner alive until the attribute is removed or the child is
//! stored elsewhere, so `make().inner.parent` outlives the temporary owner.
//! The read/write algorithm with accessors and metatable fallback lives on
//! the evaluator, since accessors are calls.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use lagoon_ir::Ident;
use rustc_hash::FxBuildHasher;

use super::Value;

/// Name of the slot consulted when a read misses.
pub const METATABLE: &str = "metatable";

/// Name of the auto-maintained owner link.
pub const PARENT: &str = "parent";

#[derive(Default)]
pub struct Table {
    slots: RefCell<IndexMap<Ident, Value, FxBuildHasher>>,
    parent: RefCell<Option<Rc<Table>>>,
}

impl Table {
    pub fn new() -> Self {
        Table::default()
    }

    /// Stored slot, ignoring accessors and the metatable.
    pub fn get_slot(&self, name: &str) -> Option<Value> {
        self.slots.borrow().get(name).cloned()
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.borrow().contains_key(name)
    }

    pub fn set_slot(&self, name: Ident, value: Value) {
        self.slots.borrow_mut().insert(name, value);
    }

    pub fn remove_slot(&self, name: &str) -> Option<Value> {
        self.slots.borrow_mut().shift_remove(name)
    }

    /// Slot names in insertion order.
    pub fn slot_names(&self) -> Vec<Ident> {
        self.slots.borrow().keys().cloned().collect()
    }

    /// Slots in insertion order.
    pub fn slots(&self) -> Vec<(Ident, Value)> {
        self.slots
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Owner the table was last stored into.
    pub fn parent(&self) -> Option<Rc<Table>> {
        self.parent.borrow().clone()
    }

    /// Links `self` to `owner`, replacing any previous owner. An explicit
    /// `parent` slot is dropped so the link is what reads see.
    pub fn set_parent(&self, owner: &Rc<Table>) {
        *self.parent.borrow_mut() = Some(Rc::clone(owner));
        self.slots.borrow_mut().shift_remove(PARENT);
    }

    pub fn clear_parent(&self) {
        self.parent.borrow_mut().take();
    }

    /// Metatable slot, if set.
    pub fn metatable(&self) -> Option<Value> {
        self.get_slot(METATABLE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_keep_insertion_order() {
        let t = Table::new();
        t.set_slot("b".into(), Value::Int(1));
        t.set_slot("a".into(), Value::Int(2));
        t.set_slot("b".into(), Value::Int(3));
        let names: Vec<String> = t.slot_names().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(t.get_slot("b"), Some(Value::Int(3)));
    }

    #[test]
    fn test_parent_link_outlives_other_owner_handles() {
        let child = Table::new();
        {
            let owner = Rc::new(Table::new());
            owner.set_slot("tag".into(), Value::Int(7));
            child.set_parent(&owner);
        }
        let parent = child.parent().unwrap();
        assert_eq!(parent.get_slot("tag"), Some(Value::Int(7)));
        child.clear_parent();
        assert!(child.parent().is_none());
    }

    #[test]
    fn test_set_parent_replaces_explicit_slot() {
        let child = Table::new();
        child.set_slot(PARENT.into(), Value::Int(5));
        let owner = Rc::new(Table::new());
        child.set_parent(&owner);
        assert!(!child.has_slot(PARENT));
        assert!(child.parent().is_some_and(|p| Rc::ptr_eq(&p, &owner)));
    }
}
