//! Small handlers that fit nowhere else.

use refract_common::{ExecError, Instr};

use super::Step;
use crate::engine::Engine;
use crate::state::StateRef;

/// POP_TOP: discard the top of the operand stack.
pub(crate) fn pop_top(
    _engine: &mut Engine,
    state: &StateRef,
    _instr: &Instr,
) -> Result<Step, ExecError> {
    state.borrow_mut().pop()?;
    Ok(Step::Continue)
}

/// RETURN_VALUE: pop the top of the stack and signal a return carrying it.
pub(crate) fn return_value(
    _engine: &mut Engine,
    state: &StateRef,
    _instr: &Instr,
) -> Result<Step, ExecError> {
    let value = state.borrow_mut().pop()?;
    Ok(Step::Return(value))
}
