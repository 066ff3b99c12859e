use hinton_lex::{LineInfo, Tok};

/// Name resolution failures raised by [`Scope`](crate::Scope).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("Undefined variable '{name}'. At => {info}")]
    UndefinedIdentifier { name: String, info: LineInfo },

    #[error("Variable \"{name}\" has not been initialized. At => {info}")]
    UninitializedVariable { name: String, info: LineInfo },

    #[error("Cannot reassign to constant \"{name}\". At => {info}")]
    ImmutableAssignment { name: String, info: LineInfo },
}

impl EnvError {
    pub fn undefined(tok: &Tok) -> Self {
        Self::UndefinedIdentifier {
            name: tok.lexeme.clone(),
            info: tok.info,
        }
    }

    pub fn uninitialized(tok: &Tok) -> Self {
        Self::UninitializedVariable {
            name: tok.lexeme.clone(),
            info: tok.info,
        }
    }

    pub fn immutable(tok: &Tok) -> Self {
        Self::ImmutableAssignment {
            name: tok.lexeme.clone(),
            info: tok.info,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EnvError::UndefinedIdentifier { name, .. }
            | EnvError::UninitializedVariable { name, .. }
            | EnvError::ImmutableAssignment { name, .. } => name,
        }
    }

    pub const fn info(&self) -> LineInfo {
        match self {
            EnvError::UndefinedIdentifier { info, .. }
            | EnvError::UninitializedVariable { info, .. }
            | EnvError::ImmutableAssignment { info, .. } => *info,
        }
    }

    /// Error class shown to users in front of the message.
    pub const fn error_name(&self) -> &'static str {
        match self {
            EnvError::UndefinedIdentifier { .. } | EnvError::UninitializedVariable { .. } => {
                "ReferenceError"
            }
            EnvError::ImmutableAssignment { .. } => "ReassignmentError",
        }
    }

    /// The message without the location suffix.
    pub fn message(&self) -> String {
        let name = self.name();
        match self {
            EnvError::UndefinedIdentifier { .. } => format!("Undefined variable '{name}'."),
            EnvError::UninitializedVariable { .. } => {
                format!("Variable \"{name}\" has not been initialized.")
            }
            EnvError::ImmutableAssignment { .. } => {
                format!("Cannot reassign to constant \"{name}\".")
            }
        }
    }
}
