//! Handlers for the LOAD_* family: positional reads from the constant
//! pool, the local slot table, and the merged global namespace.

use refract_common::{ExecError, Instr};

use super::{index_operand, Step};
use crate::engine::Engine;
use crate::state::StateRef;

/// LOAD_CONST: push `consts[operand]`.
pub(crate) fn load_const(
    _engine: &mut Engine,
    state: &StateRef,
    instr: &Instr,
) -> Result<Step, ExecError> {
    let index = index_operand(instr)?;
    let mut state = state.borrow_mut();
    let value = state.constant(index)?;
    state.push(value)?;
    Ok(Step::Continue)
}

/// LOAD_FAST: push the local slot at `operand`.
///
/// An unpopulated slot surfaces as an engine fault; arity-checked binding
/// fills every parameter slot before the first instruction runs.
pub(crate) fn load_fast(
    _engine: &mut Engine,
    state: &StateRef,
    instr: &Instr,
) -> Result<Step, ExecError> {
    let index = index_operand(instr)?;
    let mut state = state.borrow_mut();
    let value = state.load_local(index)?;
    state.push(value)?;
    Ok(Step::Continue)
}

/// LOAD_GLOBAL: resolve `names[operand]` against the merged namespace
/// (module globals first, then builtins) and push the result.
pub(crate) fn load_global(
    _engine: &mut Engine,
    state: &StateRef,
    instr: &Instr,
) -> Result<Step, ExecError> {
    let index = index_operand(instr)?;
    let mut state = state.borrow_mut();
    let name = state.global_name(index)?.to_string();
    let value = match state.globals().lookup(&name) {
        Some(value) => value.clone(),
        None => return Err(ExecError::UndefinedName { name }),
    };
    state.push(value)?;
    Ok(Step::Continue)
}
