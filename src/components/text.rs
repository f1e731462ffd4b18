//! # Text Components
//!
//! Single styled lines and verbatim text blocks.

use super::Component;
use crate::ir::{Alignment, Op};

/// A line of text with optional styling.
///
/// ## Example
///
/// ```
/// use docflow::components::*;
///
/// let plain = Text::new("dated 2024-05-01");
/// let title = Text::new("ACME").bold().center().size(2);
/// ```
pub struct Text {
    content: String,
    bold: bool,
    size: u8,
    alignment: Option<Alignment>,
}

impl Text {
    /// Create a new text line.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            bold: false,
            size: 1,
            alignment: None,
        }
    }

    /// Make text bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Glyph magnification, clamped to 1..=4.
    pub fn size(mut self, size: u8) -> Self {
        self.size = size.clamp(1, 4);
        self
    }

    /// Center the text.
    pub fn center(mut self) -> Self {
        self.alignment = Some(Alignment::Center);
        self
    }

    /// Right-align the text.
    pub fn right(mut self) -> Self {
        self.alignment = Some(Alignment::Right);
        self
    }
}

impl Component for Text {
    fn emit(&self, ops: &mut Vec<Op>) {
        if let Some(align) = self.alignment {
            ops.push(Op::SetAlign(align));
        }
        if self.bold {
            ops.push(Op::SetBold(true));
        }
        if self.size != 1 {
            ops.push(Op::SetSize(self.size));
        }

        ops.push(Op::Text(self.content.clone()));
        ops.push(Op::Newline);

        if self.size != 1 {
            ops.push(Op::SetSize(1));
        }
        if self.bold {
            ops.push(Op::SetBold(false));
        }
        if self.alignment.is_some() {
            ops.push(Op::SetAlign(Alignment::Left));
        }
    }
}

/// A block of text reproduced verbatim.
///
/// Lines are split on `\n` and hard-wrapped at `width` characters. No
/// character is dropped or interpreted, and blank lines are kept.
pub struct TextBlock {
    content: String,
    width: usize,
}

impl TextBlock {
    pub fn new(content: impl Into<String>, width: usize) -> Self {
        Self {
            content: content.into(),
            width: width.max(1),
        }
    }

    /// The wrapped lines this block will emit.
    pub fn lines(&self) -> Vec<String> {
        if self.content.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::new();
        for raw in self.content.split('\n') {
            let chars: Vec<char> = raw.chars().collect();
            if chars.is_empty() {
                lines.push(String::new());
                continue;
            }
            for chunk in chars.chunks(self.width) {
                lines.push(chunk.iter().collect());
            }
        }
        lines
    }
}

impl Component for TextBlock {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::SetAlign(Alignment::Left));
        for line in self.lines() {
            if !line.is_empty() {
                ops.push(Op::Text(line));
            }
            ops.push(Op::Newline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_plain_text() {
        let ir = Text::new("Hello").compile();
        assert_eq!(ir.ops, vec![Op::Init, Op::Text("Hello".into()), Op::Newline]);
    }

    #[test]
    fn test_styled_text_restores_state() {
        let ir = Text::new("TITLE").bold().center().size(2).compile();
        assert_eq!(
            ir.ops,
            vec![
                Op::Init,
                Op::SetAlign(Alignment::Center),
                Op::SetBold(true),
                Op::SetSize(2),
                Op::Text("TITLE".into()),
                Op::Newline,
                Op::SetSize(1),
                Op::SetBold(false),
                Op::SetAlign(Alignment::Left),
            ]
        );
    }

    #[test]
    fn test_right_aligned_line() {
        let ir = Text::new("TOTAL").right().compile();
        assert_eq!(
            ir.ops,
            vec![
                Op::Init,
                Op::SetAlign(Alignment::Right),
                Op::Text("TOTAL".into()),
                Op::Newline,
                Op::SetAlign(Alignment::Left),
            ]
        );
    }

    #[test]
    fn test_size_is_clamped() {
        let ir = Text::new("big").size(9).compile();
        assert!(ir.ops.contains(&Op::SetSize(4)));
    }

    #[test]
    fn test_text_block_wraps_without_loss() {
        let block = TextBlock::new("abcdefgh\n\nxy", 3);
        assert_eq!(block.lines(), vec!["abc", "def", "gh", "", "xy"]);
        let rejoined: String = block.lines().concat();
        assert_eq!(rejoined, "abcdefghxy");
    }

    #[test]
    fn test_text_block_keeps_markup_literal() {
        let block = TextBlock::new("**not bold** <b>", 80);
        assert_eq!(block.lines(), vec!["**not bold** <b>"]);
    }

    #[test]
    fn test_text_block_counts_chars_not_bytes() {
        let block = TextBlock::new("ЖЖЖЖ", 2);
        assert_eq!(block.lines(), vec!["ЖЖ", "ЖЖ"]);
    }

    #[test]
    fn test_empty_text_block_emits_nothing_visible() {
        let ir = TextBlock::new("", 10).compile();
        assert_eq!(ir.ops, vec![Op::Init, Op::SetAlign(Alignment::Left)]);
    }
}
