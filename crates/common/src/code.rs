//! Disassembled code for one callable.
//!
//! A [`CodeObject`] is the instruction provider's output: the positional
//! tables and the ordered instruction sequence the engine executes. The
//! provider itself (the front-end that inspects a callable and produces
//! this) lives outside this workspace.

use crate::instr::Instr;
use crate::value::Value;

/// The disassembled body of one interpreted callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeObject {
    /// Constant pool, referenced positionally by LOAD_CONST.
    pub consts: Vec<Value>,
    /// Name table for global symbols, referenced positionally by LOAD_GLOBAL.
    pub names: Vec<String>,
    /// Local slot table: parameter names first, then other locals.
    pub varnames: Vec<String>,
    /// Ordered, branch-free instruction sequence.
    pub instructions: Vec<Instr>,
    /// Declared parameter count.
    pub param_count: usize,
    /// Declared default count. Defaults are not fillable by the engine;
    /// they only reduce the required positional count.
    pub default_count: usize,
    /// Declared maximum operand stack depth.
    pub max_stack: usize,
}

impl CodeObject {
    /// Number of positional arguments a call must supply exactly.
    pub fn required_args(&self) -> usize {
        self.param_count.saturating_sub(self.default_count)
    }
}
