//! The execution engine: resolution, state construction, instruction
//! iteration, dispatch, call-trail bookkeeping, and error handling.
//!
//! Nested interpreted calls are ordinary recursion through
//! [`Engine::call`]; each level gets its own isolated [`FunctionState`].
//! Only the call trail and the root marker are shared, and both are
//! engine-instance state. The trail is an explicit structure rather than
//! the host call stack because it must stay inspectable after an error
//! has unwound past the point of failure.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, trace};

use refract_common::{ExecError, Function, Instr, Runnable, Value};

use crate::error::EngineError;
use crate::ops::{self, Step};
use crate::state::{FunctionState, StateRef};
use crate::traceback::Traceback;

/// One record of the engine-owned call trail: the invocation state paired
/// with the instruction in flight. Pushed before dispatch, popped after
/// the instruction completes, left in place on error for the rewriter.
pub struct TrailEntry {
    pub state: StateRef,
    pub instr: Instr,
}

/// The Refract execution engine.
///
/// An engine instance serves one logical thread of control. The trail and
/// root marker are per-instance; concurrent use would require both to
/// move to per-execution context.
pub struct Engine {
    trail: Vec<TrailEntry>,
    /// The first runnable ever executed, retained for the engine's
    /// lifetime. The invocation that installed it performs trace
    /// rewriting; every other invocation propagates errors unchanged.
    root: Option<Runnable>,
    log_traces: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            trail: Vec::new(),
            root: None,
            log_traces: true,
        }
    }

    /// Control whether rewritten traces are emitted through `tracing`
    /// before being returned. On by default.
    pub fn log_traces(mut self, enabled: bool) -> Self {
        self.log_traces = enabled;
        self
    }

    /// The engine's root marker, once set.
    pub fn root(&self) -> Option<&Runnable> {
        self.root.as_ref()
    }

    /// Execute a runnable to completion.
    ///
    /// The first invocation on this engine becomes the root: if a domain
    /// error surfaces here, the call trail is rewritten into an
    /// interpreted-only [`Traceback`], the rendering is emitted as a
    /// diagnostic, and the trace is attached to the returned error.
    /// Engine faults are logged and propagated unchanged, never rewritten.
    pub fn execute(&mut self, runnable: Runnable) -> Result<Value, EngineError> {
        let is_root = self.root.is_none();
        if is_root {
            self.root = Some(runnable.clone());
        }

        match self.call(&runnable) {
            Ok(value) => Ok(value),
            Err(kind) if is_root && kind.is_domain() => {
                let trace = Traceback::rewrite(&self.trail);
                self.trail.clear();
                if self.log_traces {
                    error!("{}", trace.render(&kind));
                }
                Err(EngineError {
                    kind,
                    trace: Some(trace),
                })
            }
            Err(kind) => {
                self.trail.clear();
                Err(EngineError { kind, trace: None })
            }
        }
    }

    /// Run one invocation. Re-entered recursively for nested interpreted
    /// calls; errors propagate unchanged below the root.
    pub(crate) fn call(&mut self, runnable: &Runnable) -> Result<Value, ExecError> {
        let def = match runnable.function() {
            // Primitives have no inspectable body and are never interpreted.
            Function::Native(_) => return runnable.run_natively(),
            Function::Interpreted(def) => Rc::clone(def),
        };

        // Both checks run before any instruction executes.
        runnable.check_bindable(def.code())?;

        trace!(
            function = %def.qualname(),
            args = runnable.args().len(),
            depth = self.trail.len(),
            "interpreting call"
        );

        let state: StateRef = Rc::new(RefCell::new(FunctionState::new(
            &def,
            runnable.args().to_vec(),
        )));
        let code = Rc::clone(def.code());

        // Bodies are linear and branch-free; iterate strictly in order.
        for instr in &code.instructions {
            if let Some(line) = instr.starts_line {
                state.borrow_mut().set_line(line);
            }

            self.trail.push(TrailEntry {
                state: Rc::clone(&state),
                instr: *instr,
            });

            let handler =
                ops::resolve(instr.op).ok_or(ExecError::UnknownInstruction {
                    opcode: instr.op.code(),
                })?;

            match handler(self, &state, instr) {
                Ok(Step::Continue) => {
                    self.trail.pop();
                }
                // The return signal is filtered out here; it never reaches
                // error handling. The instruction completed, so its trail
                // entry comes off like any other.
                Ok(Step::Return(value)) => {
                    self.trail.pop();
                    return Ok(value);
                }
                Err(err) => {
                    if !err.is_domain() {
                        error!(
                            function = %def.qualname(),
                            stack = ?state.borrow().operand_stack(),
                            "engine fault, operand stack at failure"
                        );
                    }
                    return Err(err);
                }
            }
        }

        // The stream ended without a return signal; the call yields the
        // absent value.
        Ok(Value::None)
    }

    #[cfg(test)]
    fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use refract_common::{CodeObject, FunctionDef, Namespace, Op};

    fn instr(op: Op) -> Instr {
        Instr::new(op)
    }

    fn instr_arg(op: Op, operand: u32) -> Instr {
        Instr::with_operand(op, operand)
    }

    /// inner(a): return undefined_name
    fn failing_inner() -> Function {
        Function::interpreted(FunctionDef::new(
            "demo.inner",
            CodeObject {
                consts: vec![],
                names: vec!["missing".into()],
                varnames: vec!["a".into()],
                instructions: vec![
                    instr_arg(Op::LoadGlobal, 0).at_line(1),
                    instr(Op::ReturnValue),
                ],
                param_count: 1,
                default_count: 0,
                max_stack: 1,
            },
            Namespace::default(),
        ))
    }

    /// outer(a): return inner(a)
    fn outer_calling(inner: Function) -> Function {
        let globals: HashMap<String, Value> =
            [("inner".to_string(), Value::Function(inner))].into();
        Function::interpreted(FunctionDef::new(
            "demo.outer",
            CodeObject {
                consts: vec![],
                names: vec!["inner".into()],
                varnames: vec!["a".into()],
                instructions: vec![
                    instr_arg(Op::LoadGlobal, 0).at_line(2),
                    instr_arg(Op::LoadFast, 0),
                    instr_arg(Op::CallFunction, 1),
                    instr(Op::ReturnValue),
                ],
                param_count: 1,
                default_count: 0,
                max_stack: 2,
            },
            Namespace::from_globals(globals),
        ))
    }

    /// id(a): return a
    fn identity() -> Function {
        Function::interpreted(FunctionDef::new(
            "demo.id",
            CodeObject {
                consts: vec![],
                names: vec![],
                varnames: vec!["a".into()],
                instructions: vec![
                    instr_arg(Op::LoadFast, 0).at_line(1),
                    instr(Op::ReturnValue),
                ],
                param_count: 1,
                default_count: 0,
                max_stack: 1,
            },
            Namespace::default(),
        ))
    }

    #[test]
    fn trail_is_empty_after_success() {
        let mut engine = Engine::new().log_traces(false);
        let result = engine.execute(Runnable::bind(identity(), vec![Value::Int(3)], vec![]));
        assert_eq!(result.unwrap(), Value::Int(3));
        assert_eq!(engine.trail_len(), 0);
    }

    #[test]
    fn trail_is_retained_below_the_root_on_error() {
        let mut engine = Engine::new().log_traces(false);
        let runnable = Runnable::bind(
            outer_calling(failing_inner()),
            vec![Value::Int(1)],
            vec![],
        );
        // Exercise the recursive core directly, as a nested invocation
        // would: the trail must survive the unwind.
        let err = engine.call(&runnable).unwrap_err();
        assert!(err.is_domain());
        // One entry per recursion level: outer's CALL_FUNCTION and
        // inner's LOAD_GLOBAL.
        assert_eq!(engine.trail_len(), 2);
        assert_eq!(engine.trail[0].instr.op, Op::CallFunction);
        assert_eq!(engine.trail[1].instr.op, Op::LoadGlobal);
    }

    #[test]
    fn root_marker_is_recorded_once_and_kept() {
        let mut engine = Engine::new().log_traces(false);
        let first = Runnable::bind(identity(), vec![Value::Int(1)], vec![]);
        engine.execute(first).unwrap();
        assert_eq!(engine.root().map(|r| r.qualname()), Some("demo.id"));

        let second = Runnable::bind(failing_inner(), vec![Value::Int(1)], vec![]);
        engine.execute(second).unwrap_err();
        // Still the first runnable: the marker is never reset.
        assert_eq!(engine.root().map(|r| r.qualname()), Some("demo.id"));
    }

    #[test]
    fn rewriting_happens_only_for_the_root_installer() {
        let mut engine = Engine::new().log_traces(false);
        engine
            .execute(Runnable::bind(identity(), vec![Value::Int(1)], vec![]))
            .unwrap();

        // A later invocation did not install the root marker, so its
        // errors pass through without a rewritten trace.
        let err = engine
            .execute(Runnable::bind(failing_inner(), vec![Value::Int(1)], vec![]))
            .unwrap_err();
        assert!(err.kind.is_domain());
        assert!(err.trace.is_none());
    }

    #[test]
    fn steady_state_trail_depth_matches_recursion() {
        // Depth inside outer -> inner is covered by the retained-trail
        // test; between executions the root-level view stays at zero.
        let mut engine = Engine::new().log_traces(false);
        for _ in 0..3 {
            engine
                .execute(Runnable::bind(identity(), vec![Value::Int(1)], vec![]))
                .unwrap();
            assert_eq!(engine.trail_len(), 0);
        }
    }
}
