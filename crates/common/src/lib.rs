//! Refract common types — the shared vocabulary between the disassembler
//! front-end and the execution engine.
//!
//! This crate provides the data model for pre-disassembled callables:
//!
//! - [`Value`] — runtime values held on the operand stack and in slots
//! - [`Op`] / [`Instr`] — the fixed instruction identities and the
//!   instruction record the provider emits
//! - [`CodeObject`] — one callable's constant pool, name table, local
//!   slot table, and instruction sequence
//! - [`Function`] / [`FunctionDef`] / [`NativeFn`] — callables, native
//!   and interpreted
//! - [`Namespace`] — merged global/builtin name resolution
//! - [`Runnable`] — a callable bound to concrete arguments, ready for
//!   the engine
//! - [`ExecError`] — the shared execution error vocabulary
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime
//! cost) and has no other dependencies.

pub mod code;
pub mod error;
pub mod function;
pub mod instr;
pub mod namespace;
pub mod runnable;
pub mod value;

// Re-export commonly used types at the crate root.
pub use code::CodeObject;
pub use error::ExecError;
pub use function::{Function, FunctionDef, NativeFn};
pub use instr::{Instr, Op};
pub use namespace::Namespace;
pub use runnable::Runnable;
pub use value::Value;
