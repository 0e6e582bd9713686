//! Operation handlers and dispatch resolution.
//!
//! Each executable [`Op`] maps to exactly one handler. Resolution is a
//! pure function of the operation identity, so callers may memoize it
//! freely without changing observable behavior; the match below *is* the
//! dispatch table. Handlers are grouped by family: `load` for the table
//! reads, `call` for the heavy call instruction, `misc` for the rest.

pub(crate) mod call;
pub(crate) mod load;
pub(crate) mod misc;

use refract_common::{ExecError, Instr, Op, Value};

use crate::engine::Engine;
use crate::state::StateRef;

/// Outcome of dispatching one instruction. The failure arm is the `Err`
/// side of the handler's `Result`; an explicit return is not an error and
/// never enters error handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Proceed to the next instruction.
    Continue,
    /// Stop iterating; the carried value is the call's result.
    Return(Value),
}

/// A handler mutates the execution state and may re-enter the engine.
pub type OpHandler = fn(&mut Engine, &StateRef, &Instr) -> Result<Step, ExecError>;

/// Find the handler for an operation identity.
///
/// Returns `None` for [`Op::Unrecognized`]; the engine turns that into
/// [`ExecError::UnknownInstruction`].
pub fn resolve(op: Op) -> Option<OpHandler> {
    match op {
        Op::LoadConst => Some(load::load_const as OpHandler),
        Op::LoadFast => Some(load::load_fast as OpHandler),
        Op::LoadGlobal => Some(load::load_global as OpHandler),
        Op::CallFunction => Some(call::call_function as OpHandler),
        Op::PopTop => Some(misc::pop_top as OpHandler),
        Op::ReturnValue => Some(misc::return_value as OpHandler),
        Op::Unrecognized(_) => None,
    }
}

/// Extract the positional operand an instruction must carry.
pub(crate) fn index_operand(instr: &Instr) -> Result<usize, ExecError> {
    instr
        .operand
        .map(|operand| operand as usize)
        .ok_or(ExecError::MissingOperand {
            mnemonic: instr.op.mnemonic(),
        })
}
