//! Per-invocation function execution state.
//!
//! One [`FunctionState`] exists per live interpreted call. It owns the
//! operand stack and the slot storage; the code object's tables are shared
//! with the definition. States are held behind `Rc<RefCell<..>>` so the
//! call trail can retain them past the point where an error unwinds the
//! engine's own recursion.

use std::cell::RefCell;
use std::rc::Rc;

use refract_common::{CodeObject, ExecError, FunctionDef, Namespace, Value};

/// Shared handle to a live (or retained) execution state.
pub type StateRef = Rc<RefCell<FunctionState>>;

/// Mutable record for one interpreted invocation.
pub struct FunctionState {
    function: String,
    code: Rc<CodeObject>,
    /// Resolved-name slots, parallel to `code.names`. `None` = unpopulated.
    names_stored: Vec<Option<Value>>,
    /// Local slot storage, parallel to `code.varnames`. Pre-filled from
    /// bound positional arguments in slot order; `None` = unpopulated.
    locals: Vec<Option<Value>>,
    stack: Vec<Value>,
    globals: Namespace,
    line: u32,
}

impl FunctionState {
    /// Build the state for one invocation, pre-filling local slots from
    /// the bound positional arguments. Arity must already be checked.
    pub fn new(def: &FunctionDef, args: Vec<Value>) -> Self {
        let code = Rc::clone(def.code());
        let mut locals: Vec<Option<Value>> = vec![None; code.varnames.len()];
        for (slot, arg) in locals.iter_mut().zip(args) {
            *slot = Some(arg);
        }
        Self {
            function: def.qualname().to_string(),
            names_stored: vec![None; code.names.len()],
            locals,
            stack: Vec::new(),
            globals: def.globals().clone(),
            line: 0,
            code,
        }
    }

    /// Qualified name of the executing callable.
    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn globals(&self) -> &Namespace {
        &self.globals
    }

    /// Line marker active for the currently dispatching instruction.
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    /// Current operand stack contents, bottom first.
    pub fn operand_stack(&self) -> &[Value] {
        &self.stack
    }

    /// Push onto the operand stack. The stack is bounded by the
    /// callable's declared maximum depth; exceeding it is an engine
    /// fault, not a program error.
    pub fn push(&mut self, value: Value) -> Result<(), ExecError> {
        if self.stack.len() >= self.code.max_stack {
            return Err(ExecError::StackOverflow {
                max: self.code.max_stack,
            });
        }
        self.stack.push(value);
        Ok(())
    }

    /// Pop the top of the operand stack.
    pub fn pop(&mut self) -> Result<Value, ExecError> {
        self.stack.pop().ok_or(ExecError::StackUnderflow)
    }

    /// Read `consts[index]`.
    pub fn constant(&self, index: usize) -> Result<Value, ExecError> {
        self.code
            .consts
            .get(index)
            .cloned()
            .ok_or(ExecError::BadIndex {
                table: "consts",
                index,
                len: self.code.consts.len(),
            })
    }

    /// Read `names[index]`, the symbol LOAD_GLOBAL resolves.
    pub fn global_name(&self, index: usize) -> Result<&str, ExecError> {
        self.code
            .names
            .get(index)
            .map(String::as_str)
            .ok_or(ExecError::BadIndex {
                table: "names",
                index,
                len: self.code.names.len(),
            })
    }

    /// Read the local slot at `index`. An unpopulated slot is an engine
    /// fault: arity-checked binding should make it unreachable.
    pub fn load_local(&self, index: usize) -> Result<Value, ExecError> {
        let slot = self.locals.get(index).ok_or(ExecError::BadIndex {
            table: "varnames",
            index,
            len: self.locals.len(),
        })?;
        match slot {
            Some(value) => Ok(value.clone()),
            None => Err(ExecError::UnpopulatedLocal {
                name: self.code.varnames[index].clone(),
            }),
        }
    }

    /// Populated-only local bindings in slot order. Unpopulated slots are
    /// omitted, not shown as absent values.
    pub fn local_snapshot(&self) -> Vec<(String, Value)> {
        self.code
            .varnames
            .iter()
            .zip(&self.locals)
            .filter_map(|(name, slot)| slot.as_ref().map(|v| (name.clone(), v.clone())))
            .collect()
    }

    /// Number of resolved-name slots still unpopulated.
    pub fn unresolved_names(&self) -> usize {
        self.names_stored.iter().filter(|slot| slot.is_none()).count()
    }
}
