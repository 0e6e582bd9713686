//! Post-hoc call trace reconstruction.
//!
//! When a domain error reaches the root invocation, the engine's own
//! recursion has already unwound; what remains is the call trail. The
//! rewriter turns that trail into a chain of synthetic frames that shows
//! only interpreted-level structure, so the failure reads like the
//! interpreted program's own trace rather than a walk through the
//! engine's internals.

use std::fmt;

use refract_common::{ExecError, Namespace, Op, Value};

use crate::engine::TrailEntry;

/// One synthetic frame of the rewritten trace.
#[derive(Debug, Clone)]
pub struct TraceFrame {
    /// Qualified name of the originating callable.
    pub function: String,
    /// Line marker active when the in-flight instruction was dispatched.
    pub line: u32,
    /// The in-flight instruction's identity.
    pub op: Op,
    /// Populated-only local bindings, in slot order.
    pub locals: Vec<(String, Value)>,
    /// The callable's global namespace.
    pub globals: Namespace,
}

/// A rewritten, interpreted-only call trace. Frames link in call order,
/// outermost first.
#[derive(Debug, Clone)]
pub struct Traceback {
    frames: Vec<TraceFrame>,
}

impl Traceback {
    /// Rebuild the trace from a retained call trail, oldest entry first.
    ///
    /// The trail shares each invocation's state by reference, so the
    /// snapshot taken here is exactly the state at the moment the failing
    /// instruction was dispatched: nothing mutates a frame after its
    /// dispatch stops.
    pub fn rewrite(trail: &[TrailEntry]) -> Self {
        let frames = trail
            .iter()
            .map(|entry| {
                let state = entry.state.borrow();
                TraceFrame {
                    function: state.function().to_string(),
                    line: state.line(),
                    op: entry.instr.op,
                    locals: state.local_snapshot(),
                    globals: state.globals().clone(),
                }
            })
            .collect();
        Self { frames }
    }

    /// The frames, outermost first.
    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    /// Full diagnostic rendering: the trace followed by the error message.
    pub fn render(&self, error: &ExecError) -> String {
        format!("{self}{error}")
    }
}

impl fmt::Display for Traceback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Traceback (most recent call last):")?;
        for frame in &self.frames {
            writeln!(
                f,
                "  in {}, line {} ({})",
                frame.function,
                frame.line,
                frame.op.mnemonic()
            )?;
            if !frame.locals.is_empty() {
                write!(f, "    locals:")?;
                for (i, (name, value)) in frame.locals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {name} = {value}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use refract_common::{CodeObject, FunctionDef, Instr};

    use crate::state::FunctionState;

    fn entry(function: &str, varnames: &[&str], args: Vec<Value>, line: u32, op: Op) -> TrailEntry {
        let def = FunctionDef::new(
            function,
            CodeObject {
                consts: vec![],
                names: vec![],
                varnames: varnames.iter().map(|s| s.to_string()).collect(),
                instructions: vec![],
                param_count: args.len(),
                default_count: 0,
                max_stack: 4,
            },
            Namespace::default(),
        );
        let mut state = FunctionState::new(&def, args);
        state.set_line(line);
        TrailEntry {
            state: Rc::new(RefCell::new(state)),
            instr: Instr::new(op),
        }
    }

    #[test]
    fn frames_follow_trail_order() {
        let trail = vec![
            entry(
                "demo.outer",
                &["a", "b"],
                vec![Value::Int(1), Value::Int(2)],
                3,
                Op::CallFunction,
            ),
            entry("demo.inner", &["a"], vec![Value::Int(1)], 1, Op::LoadGlobal),
        ];
        let tb = Traceback::rewrite(&trail);
        assert_eq!(tb.frames().len(), 2);
        assert_eq!(tb.frames()[0].function, "demo.outer");
        assert_eq!(tb.frames()[0].line, 3);
        assert_eq!(tb.frames()[1].function, "demo.inner");
        assert_eq!(tb.frames()[1].op, Op::LoadGlobal);
    }

    #[test]
    fn unpopulated_locals_are_omitted() {
        let trail = vec![entry(
            "demo.f",
            &["a", "tmp"],
            vec![Value::Int(5)],
            1,
            Op::LoadFast,
        )];
        let tb = Traceback::rewrite(&trail);
        assert_eq!(tb.frames()[0].locals, vec![("a".to_string(), Value::Int(5))]);
    }

    #[test]
    fn rendering_reads_like_a_trace() {
        let trail = vec![
            entry("demo.outer", &["a"], vec![Value::Int(1)], 2, Op::CallFunction),
            entry("demo.inner", &[], vec![], 1, Op::LoadGlobal),
        ];
        let tb = Traceback::rewrite(&trail);
        let rendered = tb.render(&ExecError::UndefinedName { name: "b".into() });
        assert!(rendered.starts_with("Traceback (most recent call last):\n"));
        assert!(rendered.contains("  in demo.outer, line 2 (CALL_FUNCTION)\n"));
        assert!(rendered.contains("    locals: a = 1\n"));
        assert!(rendered.contains("  in demo.inner, line 1 (LOAD_GLOBAL)\n"));
        assert!(rendered.ends_with("name 'b' is not defined"));
    }
}
