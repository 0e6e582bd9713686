//! Callable representation.
//!
//! The engine distinguishes exactly two kinds of callable. A native
//! function is a host closure with no inspectable body; it is always
//! invoked directly and never interpreted. An interpreted function carries
//! its disassembled [`CodeObject`] and defining namespace, and is always
//! re-interpreted when called from interpreted code. An interpreted
//! function may also carry the host implementation it was disassembled
//! from, which powers the native escape hatch.

use std::fmt;
use std::rc::Rc;

use crate::code::CodeObject;
use crate::error::ExecError;
use crate::namespace::Namespace;
use crate::value::Value;

/// Host implementation of a callable body.
pub type NativeBody = Box<dyn Fn(&[Value]) -> Result<Value, ExecError>>;

/// A native leaf callable. No inspectable body; bypasses interpretation.
pub struct NativeFn {
    name: String,
    body: NativeBody,
}

impl NativeFn {
    /// Invoke the host body with positional arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, ExecError> {
        (self.body)(args)
    }

    /// Qualified display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn").field("name", &self.name).finish()
    }
}

/// An interpreted callable: a qualified name bound to disassembled code
/// and the namespace of its defining module.
pub struct FunctionDef {
    qualname: String,
    code: Rc<CodeObject>,
    globals: Namespace,
    native: Option<NativeBody>,
}

impl FunctionDef {
    pub fn new(qualname: impl Into<String>, code: CodeObject, globals: Namespace) -> Self {
        Self {
            qualname: qualname.into(),
            code: Rc::new(code),
            globals,
            native: None,
        }
    }

    /// Attach the host implementation this definition was disassembled
    /// from. Enables `Runnable::run_natively` for this callable.
    pub fn with_native_body(
        mut self,
        body: impl Fn(&[Value]) -> Result<Value, ExecError> + 'static,
    ) -> Self {
        self.native = Some(Box::new(body));
        self
    }

    pub fn qualname(&self) -> &str {
        &self.qualname
    }

    pub fn code(&self) -> &Rc<CodeObject> {
        &self.code
    }

    pub fn globals(&self) -> &Namespace {
        &self.globals
    }

    /// The host implementation, when one was attached.
    pub fn native_body(&self) -> Option<&NativeBody> {
        self.native.as_ref()
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("qualname", &self.qualname)
            .field("code", &self.code)
            .field("has_native_body", &self.native.is_some())
            .finish()
    }
}

/// A callable value.
#[derive(Debug, Clone)]
pub enum Function {
    /// Host primitive. Executed directly, never interpreted.
    Native(Rc<NativeFn>),
    /// Disassembled body. Always re-interpreted by the engine.
    Interpreted(Rc<FunctionDef>),
}

impl Function {
    /// Wrap a host closure as a native leaf callable.
    pub fn native(
        name: impl Into<String>,
        body: impl Fn(&[Value]) -> Result<Value, ExecError> + 'static,
    ) -> Self {
        Function::Native(Rc::new(NativeFn {
            name: name.into(),
            body: Box::new(body),
        }))
    }

    /// Wrap a definition as an interpreted callable.
    pub fn interpreted(def: FunctionDef) -> Self {
        Function::Interpreted(Rc::new(def))
    }

    /// Qualified display name.
    pub fn qualname(&self) -> &str {
        match self {
            Function::Native(nf) => nf.name(),
            Function::Interpreted(def) => def.qualname(),
        }
    }

    /// Whether calls bypass interpretation entirely.
    pub fn bypasses_interpretation(&self) -> bool {
        matches!(self, Function::Native(_))
    }
}

// Callables compare by reference identity, like the host objects they
// stand in for.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Native(a), Function::Native(b)) => Rc::ptr_eq(a, b),
            (Function::Interpreted(a), Function::Interpreted(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Function {}
