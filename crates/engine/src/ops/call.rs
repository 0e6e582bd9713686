//! CALL_FUNCTION handler.
//!
//! This is the heavy instruction: it re-enters the engine for interpreted
//! targets, so it gets its own module. Any callable not explicitly a
//! native leaf is re-interpreted, whether or not it was ever marked for
//! the engine.

use refract_common::{ExecError, Instr, Runnable, Value};

use super::{index_operand, Step};
use crate::engine::Engine;
use crate::state::StateRef;

/// CALL_FUNCTION: pop `operand` arguments and the callable beneath them,
/// invoke, push the result.
pub(crate) fn call_function(
    engine: &mut Engine,
    state: &StateRef,
    instr: &Instr,
) -> Result<Step, ExecError> {
    let argc = index_operand(instr)?;

    let (callee, args) = {
        let mut state = state.borrow_mut();
        // Arguments sit on the stack backwards; pop then reverse to
        // restore left-to-right call order.
        let mut args = Vec::with_capacity(argc);
        for _ in 0..argc {
            args.push(state.pop()?);
        }
        args.reverse();
        (state.pop()?, args)
    };

    let function = match callee {
        Value::Function(function) => function,
        other => {
            return Err(ExecError::NotCallable {
                type_name: other.type_name(),
            })
        }
    };

    let runnable = Runnable::bind(function, args, Vec::new());
    let result = if runnable.function().bypasses_interpretation() {
        runnable.run_natively()?
    } else {
        engine.call(&runnable)?
    };

    state.borrow_mut().push(result)?;
    Ok(Step::Continue)
}
