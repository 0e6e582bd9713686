//! Instruction model for pre-disassembled streams.
//!
//! The engine never decodes bytes itself. A front-end disassembler hands it
//! an ordered sequence of [`Instr`] records, each naming an operation
//! identity, an optional positional operand, and an optional new-line
//! marker. Only six identities are executable; everything else maps to the
//! explicit [`Op::Unrecognized`] variant so an unsupported stream fails with
//! a deliberate error rather than an absent-key lookup.

use std::fmt;

/// Operation identity for one instruction.
///
/// Numeric identities follow the source stream format the disassembler
/// emits. [`Op::from_code`] is total: any byte outside the supported set
/// yields [`Op::Unrecognized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Discard the top of the operand stack.
    PopTop,
    /// Pop the top of the stack and return it from the current call.
    ReturnValue,
    /// Push `consts[operand]`.
    LoadConst,
    /// Resolve `names[operand]` in the merged global namespace and push it.
    LoadGlobal,
    /// Push the local slot at `operand`.
    LoadFast,
    /// Pop `operand` arguments and a callable, invoke it, push the result.
    CallFunction,
    /// Any opcode byte the engine has no handler for.
    Unrecognized(u8),
}

impl Op {
    /// The numeric identity of this operation in the source stream format.
    pub fn code(&self) -> u8 {
        match self {
            Op::PopTop => 1,
            Op::ReturnValue => 83,
            Op::LoadConst => 100,
            Op::LoadGlobal => 116,
            Op::LoadFast => 124,
            Op::CallFunction => 131,
            Op::Unrecognized(code) => *code,
        }
    }

    /// Map a numeric identity to an operation. Total: unsupported bytes
    /// become [`Op::Unrecognized`].
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Op::PopTop,
            83 => Op::ReturnValue,
            100 => Op::LoadConst,
            116 => Op::LoadGlobal,
            124 => Op::LoadFast,
            131 => Op::CallFunction,
            other => Op::Unrecognized(other),
        }
    }

    /// Mnemonic name, as a disassembler would print it.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Op::PopTop => "POP_TOP",
            Op::ReturnValue => "RETURN_VALUE",
            Op::LoadConst => "LOAD_CONST",
            Op::LoadGlobal => "LOAD_GLOBAL",
            Op::LoadFast => "LOAD_FAST",
            Op::CallFunction => "CALL_FUNCTION",
            Op::Unrecognized(_) => "<unrecognized>",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// All executable operations, in identity order. Useful for exhaustive
/// testing; [`Op::Unrecognized`] is deliberately absent.
pub const EXECUTABLE_OPS: [Op; 6] = [
    Op::PopTop,
    Op::ReturnValue,
    Op::LoadConst,
    Op::LoadGlobal,
    Op::LoadFast,
    Op::CallFunction,
];

/// A single pre-disassembled instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    /// The operation to perform.
    pub op: Op,
    /// Positional operand. Meaning depends on `op`; `None` for operations
    /// that take no operand.
    pub operand: Option<u32>,
    /// Set when this instruction begins a new source line.
    pub starts_line: Option<u32>,
}

impl Instr {
    /// An instruction with no operand.
    pub fn new(op: Op) -> Self {
        Self {
            op,
            operand: None,
            starts_line: None,
        }
    }

    /// An instruction with a positional operand.
    pub fn with_operand(op: Op, operand: u32) -> Self {
        Self {
            op,
            operand: Some(operand),
            starts_line: None,
        }
    }

    /// Attach a new-line marker.
    pub fn at_line(mut self, line: u32) -> Self {
        self.starts_line = Some(line);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip_for_executable_ops() {
        for op in EXECUTABLE_OPS {
            assert_eq!(Op::from_code(op.code()), op);
        }
    }

    #[test]
    fn unsupported_codes_map_to_unrecognized() {
        assert_eq!(Op::from_code(0), Op::Unrecognized(0));
        assert_eq!(Op::from_code(90), Op::Unrecognized(90));
        assert_eq!(Op::Unrecognized(90).code(), 90);
    }

    #[test]
    fn mnemonics() {
        assert_eq!(Op::LoadConst.mnemonic(), "LOAD_CONST");
        assert_eq!(Op::CallFunction.mnemonic(), "CALL_FUNCTION");
        assert_eq!(Op::Unrecognized(7).mnemonic(), "<unrecognized>");
        assert_eq!(Op::ReturnValue.to_string(), "RETURN_VALUE");
    }

    #[test]
    fn instr_builders() {
        let plain = Instr::new(Op::PopTop);
        assert_eq!(plain.operand, None);
        assert_eq!(plain.starts_line, None);

        let loaded = Instr::with_operand(Op::LoadConst, 3).at_line(12);
        assert_eq!(loaded.operand, Some(3));
        assert_eq!(loaded.starts_line, Some(12));
    }
}
