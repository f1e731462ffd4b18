//! # Sheet Component
//!
//! The root container of a rendered document.

use super::Component;
use crate::ir::Op;

/// Sheet is the root container component.
///
/// ## Example
///
/// ```
/// use docflow::components::*;
///
/// let sheet = Sheet::new()
///     .child(Text::new("ACME").center().bold())
///     .child(Rule::thin());
///
/// let ir = sheet.compile();
/// assert!(!ir.is_empty());
/// ```
pub struct Sheet {
    children: Vec<Box<dyn Component>>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

impl Sheet {
    /// Create a new empty sheet.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Add a child component.
    pub fn child<C: Component + 'static>(mut self, component: C) -> Self {
        self.children.push(Box::new(component));
        self
    }
}

impl Component for Sheet {
    fn emit(&self, ops: &mut Vec<Op>) {
        for child in &self.children {
            child.emit(ops);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ComponentExt, Text};

    #[test]
    fn test_empty_sheet() {
        let ir = Sheet::new().compile();
        assert_eq!(ir.len(), 1);
        assert_eq!(ir.ops[0], Op::Init);
    }

    #[test]
    fn test_sheet_children_in_order() {
        let ir = Sheet::new()
            .child(Text::new("Hello"))
            .child(Text::new("World"))
            .compile();
        assert_eq!(ir.text_lines(), vec!["Hello", "World"]);
    }
}
