//! Lexical environment for the Hinton tree-walking interpreter.
//!
//! A [`Scope`] is one frame of the binding tree. Frames are shared by every
//! child scope and closure that refers to them, and name resolution walks
//! from the innermost frame out to the global one.

pub mod binding;
pub mod env;
pub mod err;
pub mod func;
pub mod report;
pub mod val;
mod test;

pub use binding::{BindKind, Binding, Slot};
pub use env::Scope;
pub use err::EnvError;
pub use func::Func;
pub use val::Value;
