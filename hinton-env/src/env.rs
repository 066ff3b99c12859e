use std::{cell::RefCell, fmt::Display, rc::Rc};

use hinton_lex::Tok;
use indexmap::IndexMap;

use crate::{
    binding::{BindKind, Binding, Slot},
    err::EnvError,
    val::Value,
};

#[derive(Debug, Default)]
struct Frame {
    bindings: RefCell<IndexMap<String, Binding>>,
    enclosing: Option<Scope>,
}

// Unlinks the chain one frame at a time so dropping a deep chain does not
// recurse once per frame. Stops at the first frame someone else still holds.
impl Drop for Frame {
    fn drop(&mut self) {
        let mut next = self.enclosing.take();
        while let Some(Scope(rc)) = next {
            next = Rc::into_inner(rc).and_then(|mut frame| frame.enclosing.take());
        }
    }
}

/// Handle to one frame of the scope chain.
///
/// Cloning a `Scope` shares the frame rather than copying it: every child
/// scope and closure that holds a handle reads and writes the same table,
/// and the frame is dropped with its last holder. The enclosing frame is
/// set at construction and never changes.
#[derive(Debug, Clone, Default)]
pub struct Scope(Rc<Frame>);

impl Scope {
    /// Creates a root (global) scope.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: &Scope) -> Self {
        Self(Rc::new(Frame {
            bindings: RefCell::default(),
            enclosing: Some(enclosing.clone()),
        }))
    }

    /// New block scope nested inside this one.
    #[inline]
    pub fn child(&self) -> Self {
        Self::with_enclosing(self)
    }

    #[inline]
    pub fn enclosing(&self) -> Option<&Scope> {
        self.0.enclosing.as_ref()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.enclosing.is_none()
    }

    /// Number of frames between this one and the root.
    pub fn depth(&self) -> usize {
        self.chain().count() - 1
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Scope) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// This frame followed by each enclosing frame, innermost first.
    fn chain(&self) -> impl Iterator<Item = &Scope> {
        std::iter::successors(Some(self), |s| s.enclosing())
    }

    /// Binds `name` in this frame only. An existing binding of the same
    /// name in this frame is replaced whatever its kind.
    pub fn define(&self, name: &str, slot: impl Into<Slot>, kind: BindKind) {
        let binding = Binding::new(slot, kind);
        log::debug!("define {kind} '{name}' = {}", binding.slot());
        if let Some(old) = self.0.bindings.borrow_mut().insert(name.to_owned(), binding) {
            log::trace!("'{name}' replaced a {} in the same scope", old.kind());
        }
    }

    #[inline]
    pub fn define_var(&self, name: &str, value: impl Into<Slot>) {
        self.define(name, value, BindKind::Variable)
    }

    #[inline]
    pub fn define_const(&self, name: &str, value: impl Into<Slot>) {
        self.define(name, value, BindKind::Constant)
    }

    #[inline]
    pub fn define_func(&self, name: &str, value: impl Into<Slot>) {
        self.define(name, value, BindKind::Function)
    }

    /// `let name;` with no initializer.
    #[inline]
    pub fn declare_var(&self, name: &str) {
        self.define(name, Slot::Uninit, BindKind::Variable)
    }

    /// Stores `value` into the innermost binding of `name`, in place.
    pub fn assign(&self, name: &Tok, value: Value) -> Result<(), EnvError> {
        for scope in self.chain() {
            let mut bindings = scope.0.bindings.borrow_mut();
            if let Some(binding) = bindings.get_mut(name.lexeme.as_str()) {
                if binding.is_const() {
                    log::debug!("refused write to constant '{}' at {}", name.lexeme, name.info);
                    return Err(EnvError::immutable(name));
                }
                log::debug!("assign '{}' = {value}", name.lexeme);
                binding.set(value);
                return Ok(());
            }
        }
        log::trace!("assign: '{}' not found in any scope", name.lexeme);
        Err(EnvError::undefined(name))
    }

    /// Value of the innermost binding of `name`.
    pub fn get(&self, name: &Tok) -> Result<Value, EnvError> {
        self.resolve(&name.lexeme, |binding| match binding.slot() {
            Slot::Init(v) => Ok(v.clone()),
            Slot::Uninit => Err(EnvError::uninitialized(name)),
        })
        .unwrap_or_else(|| {
            log::trace!("get: '{}' not found in any scope", name.lexeme);
            Err(EnvError::undefined(name))
        })
    }

    /// Kind of the binding `get` would resolve `name` to.
    pub fn kind_of(&self, name: &str) -> Option<BindKind> {
        self.resolve(name, Binding::kind)
    }

    fn resolve<R>(&self, name: &str, f: impl FnOnce(&Binding) -> R) -> Option<R> {
        for scope in self.chain() {
            if let Some(binding) = scope.0.bindings.borrow().get(name) {
                return Some(f(binding));
            }
        }
        None
    }

    /// Copy of the binding for `name` in this frame, ignoring enclosing ones.
    pub fn local(&self, name: &str) -> Option<Binding> {
        self.0.bindings.borrow().get(name).cloned()
    }

    #[inline]
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.bindings.borrow().contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.bindings.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.bindings.borrow().is_empty()
    }
}

/// Debug listing of this frame's bindings. Enclosing frames are not shown.
impl Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const RULE: &str = "====================";

        let bindings = self.0.bindings.borrow();
        let width = bindings
            .keys()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0);

        writeln!(f, "{RULE}")?;
        writeln!(f, "ENVIRONMENT")?;
        writeln!(f, "{RULE}")?;
        for (name, binding) in bindings.iter() {
            let pad = width - name.chars().count() + 4;
            writeln!(f, "{name}{}= {}", " ".repeat(pad), binding.slot())?;
        }
        writeln!(f, "{RULE}")
    }
}
