//! The runnable descriptor: a callable bound to concrete arguments.
//!
//! A [`Runnable`] is produced by an external decorator/marking step and
//! handed to the engine. It is a deferred call: nothing executes until the
//! engine interprets it or [`Runnable::run_natively`] bypasses
//! interpretation.

use std::fmt;

use crate::code::CodeObject;
use crate::error::ExecError;
use crate::function::Function;
use crate::value::Value;

/// A deferred binding of a callable to positional and keyword arguments.
#[derive(Debug, Clone)]
pub struct Runnable {
    function: Function,
    args: Vec<Value>,
    kwargs: Vec<(String, Value)>,
}

impl Runnable {
    /// Bind a callable to concrete arguments.
    pub fn bind(function: Function, args: Vec<Value>, kwargs: Vec<(String, Value)>) -> Self {
        Self {
            function,
            args,
            kwargs,
        }
    }

    pub fn function(&self) -> &Function {
        &self.function
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn kwargs(&self) -> &[(String, Value)] {
        &self.kwargs
    }

    /// Qualified name of the bound callable, for display.
    pub fn qualname(&self) -> &str {
        self.function.qualname()
    }

    /// Invoke the callable directly with the bound arguments, bypassing
    /// interpretation entirely.
    ///
    /// For an interpreted callable this requires the host body attached at
    /// definition time; without one there is nothing to run natively.
    pub fn run_natively(&self) -> Result<Value, ExecError> {
        if !self.kwargs.is_empty() {
            return Err(ExecError::UnsupportedKeywords {
                function: self.qualname().to_string(),
            });
        }
        match &self.function {
            Function::Native(nf) => nf.call(&self.args),
            Function::Interpreted(def) => match def.native_body() {
                Some(body) => body(&self.args),
                None => Err(ExecError::Native(format!(
                    "{} has no native body to run",
                    def.qualname()
                ))),
            },
        }
    }

    /// Check that the bound arguments can populate the code object's local
    /// slots. Runs before any instruction executes.
    ///
    /// Non-empty keyword arguments fail with
    /// [`ExecError::UnsupportedKeywords`]; a positional count different
    /// from `required_args` fails with [`ExecError::ArityMismatch`].
    pub fn check_bindable(&self, code: &CodeObject) -> Result<(), ExecError> {
        if !self.kwargs.is_empty() {
            return Err(ExecError::UnsupportedKeywords {
                function: self.qualname().to_string(),
            });
        }
        let required = code.required_args();
        if self.args.len() != required {
            return Err(ExecError::ArityMismatch {
                function: self.qualname().to_string(),
                required,
                given: self.args.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Runnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<runnable for {}>", self.qualname())
    }
}
