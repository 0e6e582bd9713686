//! Refract execution engine — interprets pre-disassembled instruction
//! streams one callable at a time.
//!
//! The engine is a small re-entrant machine with:
//! - An operand stack per invocation, bounded by the declared depth
//! - Positional resolution of constants, locals, and globals
//! - An engine-owned call trail that survives error unwinding
//! - A traceback rewriter that shows interpreted frames only
//!
//! # Usage
//!
//! ```
//! use refract_common::{CodeObject, Function, FunctionDef, Instr, Namespace, Op, Runnable, Value};
//! use refract_engine::Engine;
//!
//! // id(a): return a
//! let code = CodeObject {
//!     consts: vec![],
//!     names: vec![],
//!     varnames: vec!["a".into()],
//!     instructions: vec![
//!         Instr::with_operand(Op::LoadFast, 0).at_line(1),
//!         Instr::new(Op::ReturnValue),
//!     ],
//!     param_count: 1,
//!     default_count: 0,
//!     max_stack: 1,
//! };
//! let id = Function::interpreted(FunctionDef::new("demo.id", code, Namespace::default()));
//!
//! let mut engine = Engine::new();
//! let result = engine.execute(Runnable::bind(id, vec![Value::Int(2)], vec![])).unwrap();
//! assert_eq!(result, Value::Int(2));
//! ```

pub mod engine;
pub mod error;
pub mod ops;
pub mod state;
pub mod traceback;

pub use engine::Engine;
pub use error::EngineError;
pub use traceback::{TraceFrame, Traceback};

use refract_common::{Runnable, Value};

/// Execute a runnable on a fresh engine.
///
/// This is the convenience entry point; the invocation is the engine's
/// root, so domain errors come back with a rewritten, interpreted-only
/// trace attached.
///
/// # Errors
///
/// Returns [`EngineError`] if binding or execution fails (arity mismatch,
/// undefined global, unknown instruction, etc.).
pub fn execute(runnable: Runnable) -> Result<Value, EngineError> {
    Engine::new().execute(runnable)
}
