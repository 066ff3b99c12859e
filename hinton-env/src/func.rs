use std::{fmt::Debug, rc::Rc};

use crate::env::Scope;

/// A function value together with the scope it closed over.
///
/// Holding a `Func` keeps its defining scope alive, even after the block
/// or call that created that scope has finished.
pub struct Func {
    name: Rc<str>,
    closure: Scope,
}

impl Func {
    pub fn new(name: &str, closure: &Scope) -> Self {
        Self {
            name: Rc::from(name),
            closure: closure.clone(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn closure(&self) -> &Scope {
        &self.closure
    }

    /// Frame for one call. It encloses the captured scope, not the caller's.
    pub fn enter(&self) -> Scope {
        log::trace!("entering call frame of '{}'", self.name);
        Scope::with_enclosing(&self.closure)
    }
}

// Closures usually live inside the scope they capture, so printing the
// scope here would recurse forever.
impl Debug for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Func")
            .field("name", &self.name)
            .field("closure_depth", &self.closure.depth())
            .finish()
    }
}
