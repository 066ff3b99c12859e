use std::fmt::Display;

use crate::val::Value;

/// How a name was introduced. Fixed for the lifetime of the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindKind {
    Variable,
    Constant,
    Function,
}

impl Display for BindKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BindKind::Variable => "variable",
            BindKind::Constant => "constant",
            BindKind::Function => "function",
        };
        f.write_str(s)
    }
}

/// Storage for a binding's value. `Uninit` marks a name that was declared
/// but never given a value, which is not the same as `Value::Null`.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Slot {
    #[default]
    Uninit,
    Init(Value),
}

impl Slot {
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Slot::Uninit => None,
            Slot::Init(v) => Some(v),
        }
    }

    pub const fn is_init(&self) -> bool {
        matches!(self, Slot::Init(_))
    }
}

impl From<Value> for Slot {
    fn from(v: Value) -> Self {
        Self::Init(v)
    }
}

impl From<Option<Value>> for Slot {
    fn from(v: Option<Value>) -> Self {
        v.map_or(Self::Uninit, Self::Init)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Uninit => f.write_str(Binding::UNINIT_STR),
            Slot::Init(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    slot: Slot,
    kind: BindKind,
}

impl Binding {
    /// Placeholder printed for an uninitialized slot in scope dumps.
    pub const UNINIT_STR: &'static str = "null";

    pub fn new(slot: impl Into<Slot>, kind: BindKind) -> Self {
        Self {
            slot: slot.into(),
            kind,
        }
    }

    #[inline]
    pub const fn kind(&self) -> BindKind {
        self.kind
    }

    #[inline]
    pub const fn slot(&self) -> &Slot {
        &self.slot
    }

    #[inline]
    pub const fn is_const(&self) -> bool {
        matches!(self.kind, BindKind::Constant)
    }

    /// Replaces the stored value. The kind is left untouched; callers are
    /// responsible for refusing writes to constants.
    pub(crate) fn set(&mut self, value: Value) {
        self.slot = Slot::Init(value);
    }
}
