//! Execution errors shared between the runnable descriptor and the engine.
//!
//! Two families live in one enum. *Domain errors* describe a fault in the
//! interpreted program and are the only kinds the engine rewrites into a
//! synthetic call trace at the root invocation. Everything else is an
//! engine fault: it is logged with the operand stack and propagated
//! unchanged, never rewritten. [`ExecError::is_domain`] draws the line.

use thiserror::Error;

/// Errors raised while binding or executing a runnable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// Bound positional count differs from the required count.
    #[error("{function}() takes {required} positional arguments but {given} were given")]
    ArityMismatch {
        function: String,
        required: usize,
        given: usize,
    },

    /// Non-empty keyword arguments on an interpreted call. Keyword binding
    /// is explicitly unimplemented, never silently dropped.
    #[error("{function}(): keyword arguments are not supported")]
    UnsupportedKeywords { function: String },

    /// Global symbol absent from the merged namespace.
    #[error("name '{name}' is not defined")]
    UndefinedName { name: String },

    /// Opcode with no registered handler.
    #[error("no handler registered for opcode {opcode}")]
    UnknownInstruction { opcode: u8 },

    /// Pop on an empty operand stack.
    #[error("pop from empty operand stack")]
    StackUnderflow,

    /// Push past the declared maximum stack depth.
    #[error("operand stack exceeded declared depth {max}")]
    StackOverflow { max: usize },

    /// LOAD_FAST hit an unpopulated local slot. Unreachable under
    /// arity-checked binding.
    #[error("local slot '{name}' is unpopulated")]
    UnpopulatedLocal { name: String },

    /// Positional index outside a code object table.
    #[error("index {index} out of range for {table} (length {len})")]
    BadIndex {
        table: &'static str,
        index: usize,
        len: usize,
    },

    /// CALL_FUNCTION popped a value that is not callable.
    #[error("'{type_name}' value is not callable")]
    NotCallable { type_name: &'static str },

    /// An instruction that requires an operand carried none.
    #[error("{mnemonic} instruction is missing its operand")]
    MissingOperand { mnemonic: &'static str },

    /// Failure raised inside a native callable body.
    #[error("{0}")]
    Native(String),
}

impl ExecError {
    /// Whether this is a domain error: a fault in the interpreted program,
    /// eligible for trace rewriting at the root invocation. Everything
    /// else signals an engine fault and propagates unchanged.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            ExecError::ArityMismatch { .. }
                | ExecError::UnsupportedKeywords { .. }
                | ExecError::UndefinedName { .. }
                | ExecError::UnknownInstruction { .. }
                | ExecError::StackUnderflow
        )
    }
}
