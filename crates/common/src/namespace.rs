//! Merged global-name resolution.
//!
//! LOAD_GLOBAL resolves symbols against module globals layered over
//! builtins. Module globals win on a name collision; builtins are only
//! consulted when the module layer has no entry. Both layers are read-only
//! once the namespace is built.

use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

/// A merged, read-only global namespace.
///
/// Cloning is cheap: both layers are shared.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    globals: Rc<HashMap<String, Value>>,
    builtins: Rc<HashMap<String, Value>>,
}

impl Namespace {
    /// Build a namespace from a module-global layer and a builtin layer.
    pub fn new(globals: HashMap<String, Value>, builtins: HashMap<String, Value>) -> Self {
        Self {
            globals: Rc::new(globals),
            builtins: Rc::new(builtins),
        }
    }

    /// A namespace with only a module-global layer.
    pub fn from_globals(globals: HashMap<String, Value>) -> Self {
        Self::new(globals, HashMap::new())
    }

    /// Resolve a name. Module globals shadow builtins.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.globals.get(name).or_else(|| self.builtins.get(name))
    }

    /// Whether the name resolves in either layer.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, i64)]) -> HashMap<String, Value> {
        entries
            .iter()
            .map(|(name, v)| (name.to_string(), Value::Int(*v)))
            .collect()
    }

    #[test]
    fn lookup_falls_through_to_builtins() {
        let ns = Namespace::new(map(&[("a", 1)]), map(&[("len", 2)]));
        assert_eq!(ns.lookup("a"), Some(&Value::Int(1)));
        assert_eq!(ns.lookup("len"), Some(&Value::Int(2)));
        assert_eq!(ns.lookup("missing"), None);
    }

    #[test]
    fn globals_shadow_builtins_on_collision() {
        let ns = Namespace::new(map(&[("len", 10)]), map(&[("len", 2)]));
        assert_eq!(ns.lookup("len"), Some(&Value::Int(10)));
    }

    #[test]
    fn contains_checks_both_layers() {
        let ns = Namespace::new(map(&[("a", 1)]), map(&[("b", 2)]));
        assert!(ns.contains("a"));
        assert!(ns.contains("b"));
        assert!(!ns.contains("c"));
    }

    #[test]
    fn default_is_empty() {
        let ns = Namespace::default();
        assert_eq!(ns.lookup("anything"), None);
    }
}
