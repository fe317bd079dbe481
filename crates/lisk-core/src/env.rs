use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;
use lasso::Spur;

use crate::value::{intern, Value};

/// One binding slot. Cells are shared between environment frames, so
/// replacing a cell's content is visible through every frame holding it.
pub type Cell = Rc<RefCell<Value>>;

/// A flat environment frame: names to shared cells.
///
/// Cloning an `Env` aliases the same frame. [`Env::snapshot`] copies the
/// map of cell references into an independent frame; the cells themselves
/// stay shared, which is what makes `set!` on a captured variable visible
/// across every closure that captured it.
#[derive(Debug, Clone)]
pub struct Env {
    bindings: Rc<RefCell<HashMap<Spur, Cell>>>,
}

impl Env {
    pub fn new() -> Self {
        Env {
            bindings: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    pub fn get(&self, name: Spur) -> Option<Value> {
        self.bindings
            .borrow()
            .get(&name)
            .map(|cell| cell.borrow().clone())
    }

    pub fn get_str(&self, name: &str) -> Option<Value> {
        self.get(intern(name))
    }

    pub fn is_bound(&self, name: Spur) -> bool {
        self.bindings.borrow().contains_key(&name)
    }

    /// Replace the content of an existing cell in place. Returns false if
    /// the name is not bound here.
    pub fn set(&self, name: Spur, val: Value) -> bool {
        match self.bindings.borrow().get(&name) {
            Some(cell) => {
                *cell.borrow_mut() = val;
                true
            }
            None => false,
        }
    }

    /// Replace the content of an existing cell, or insert a fresh one.
    /// Returns the defined value, which is also what the form evaluates to.
    pub fn define(&self, name: Spur, val: Value) -> Value {
        let mut bindings = self.bindings.borrow_mut();
        match bindings.get(&name) {
            Some(cell) => *cell.borrow_mut() = val.clone(),
            None => {
                bindings.insert(name, Rc::new(RefCell::new(val.clone())));
            }
        }
        val
    }

    /// Insert a fresh cell, shadowing any cell copied in by [`Env::snapshot`].
    /// Used for call-time parameter binding.
    pub fn bind(&self, name: Spur, val: Value) {
        self.bindings
            .borrow_mut()
            .insert(name, Rc::new(RefCell::new(val)));
    }

    /// An independent frame holding the same cells.
    pub fn snapshot(&self) -> Env {
        Env {
            bindings: Rc::new(RefCell::new(self.bindings.borrow().clone())),
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
