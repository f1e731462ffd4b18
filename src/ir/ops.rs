//! # IR Opcodes
//!
//! Each opcode is a single atomic drawing step. Style changes are separate
//! ops so components can toggle them around their content.

/// Horizontal text alignment within the sheet's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Text style tracked while drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleState {
    pub alignment: Alignment,
    pub bold: bool,
    /// Glyph magnification, 1 = normal.
    pub size: u8,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            bold: false,
            size: 1,
        }
    }
}

/// IR opcodes.
///
/// Distances are in logical pixels; the rasterizer multiplies them by its
/// supersampling scale.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Reset style and horizontal position.
    Init,

    // ========== Style Changes ==========
    /// Set text alignment.
    SetAlign(Alignment),

    /// Enable/disable bold.
    SetBold(bool),

    /// Set glyph magnification (1 = normal, 2 = double).
    SetSize(u8),

    // ========== Content ==========
    /// Text run (no trailing newline).
    Text(String),

    /// Move to the start of the next line.
    Newline,

    /// Vertical gap.
    Feed { px: u16 },

    /// Horizontal rule across the content width.
    Rule { thickness: u8 },
}

/// A compiled IR program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create a program with an initial Init op.
    pub fn with_init() -> Self {
        Self {
            ops: vec![Op::Init],
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// All text runs in order, joined line by line.
    ///
    /// Handy for inspecting what a render says without rasterizing it.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut dirty = false;
        for op in &self.ops {
            match op {
                Op::Text(text) => {
                    current.push_str(text);
                    dirty = true;
                }
                Op::Newline => {
                    lines.push(std::mem::take(&mut current));
                    dirty = false;
                }
                _ => {}
            }
        }
        if dirty {
            lines.push(current);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_new() {
        let program = Program::new();
        assert!(program.is_empty());
    }

    #[test]
    fn test_program_with_init() {
        let program = Program::with_init();
        assert_eq!(program.len(), 1);
        assert_eq!(program.ops[0], Op::Init);
    }

    #[test]
    fn test_style_state_default() {
        let state = StyleState::default();
        assert_eq!(state.alignment, Alignment::Left);
        assert!(!state.bold);
        assert_eq!(state.size, 1);
    }

    #[test]
    fn test_text_lines() {
        let program = Program {
            ops: vec![
                Op::Init,
                Op::Text("Hello".into()),
                Op::Text(", world".into()),
                Op::Newline,
                Op::Feed { px: 4 },
                Op::Newline,
                Op::Text("tail".into()),
            ],
        };

        assert_eq!(program.text_lines(), vec!["Hello, world", "", "tail"]);
    }
}
