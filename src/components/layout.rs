//! # Layout Components
//!
//! Components for spacing, rules and fixed-width table rows.

use super::Component;
use crate::ir::{Alignment, Op};

/// A vertical gap.
///
/// ## Example
///
/// ```
/// use docflow::components::Spacer;
///
/// let gap = Spacer::px(4);
/// ```
pub struct Spacer {
    px: u16,
}

impl Spacer {
    /// Gap in logical pixels.
    pub fn px(px: u16) -> Self {
        Self { px }
    }
}

impl Component for Spacer {
    fn emit(&self, ops: &mut Vec<Op>) {
        if self.px > 0 {
            ops.push(Op::Feed { px: self.px });
        }
    }
}

/// A horizontal rule across the content width.
pub struct Rule {
    thickness: u8,
}

impl Rule {
    /// Rule of `thickness` logical pixels (at least 1).
    pub fn new(thickness: u8) -> Self {
        Self {
            thickness: thickness.max(1),
        }
    }

    /// 1px rule.
    pub fn thin() -> Self {
        Self::new(1)
    }

    /// 2px rule.
    pub fn thick() -> Self {
        Self::new(2)
    }
}

impl Component for Rule {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::Rule {
            thickness: self.thickness,
        });
    }
}

/// One cell of a [`TableRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    /// Width in character columns, including the gap to the next cell.
    pub width: usize,
    pub align: Alignment,
}

impl Cell {
    pub fn left(text: impl Into<String>, width: usize) -> Self {
        Self {
            text: text.into(),
            width,
            align: Alignment::Left,
        }
    }

    pub fn right(text: impl Into<String>, width: usize) -> Self {
        Self {
            text: text.into(),
            width,
            align: Alignment::Right,
        }
    }
}

/// A row of fixed-width cells rendered as one monospaced line.
///
/// Every cell but the last keeps one column free as a gap. Text longer than
/// its cell is cut and marked with `~`.
///
/// ## Example
///
/// ```
/// use docflow::components::{Cell, TableRow};
///
/// let row = TableRow::new(vec![Cell::left("Sand", 10), Cell::right("42", 6)]);
/// assert_eq!(row.line(), "Sand          42");
/// ```
pub struct TableRow {
    cells: Vec<Cell>,
    bold: bool,
}

impl TableRow {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells, bold: false }
    }

    /// Make the row bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// The padded line this row renders to.
    pub fn line(&self) -> String {
        let last = self.cells.len().saturating_sub(1);
        let mut line = String::new();
        for (i, cell) in self.cells.iter().enumerate() {
            let inner = if i == last {
                cell.width
            } else {
                cell.width.saturating_sub(1)
            };
            line.push_str(&fit(&cell.text, inner, cell.align));
            if i != last && cell.width > 0 {
                line.push(' ');
            }
        }
        line
    }
}

impl Component for TableRow {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::SetAlign(Alignment::Left));
        if self.bold {
            ops.push(Op::SetBold(true));
        }
        ops.push(Op::Text(self.line()));
        ops.push(Op::Newline);
        if self.bold {
            ops.push(Op::SetBold(false));
        }
    }
}

/// Pad or cut `text` to exactly `width` characters.
fn fit(text: &str, width: usize, align: Alignment) -> String {
    let len = text.chars().count();
    if len > width {
        if width == 0 {
            return String::new();
        }
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('~');
        return cut;
    }

    let pad = width - len;
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(pad)),
        Alignment::Right => format!("{}{}", " ".repeat(pad), text),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    #[test]
    fn test_spacer() {
        assert_eq!(Spacer::px(5).compile().ops, vec![Op::Init, Op::Feed { px: 5 }]);
        assert_eq!(Spacer::px(0).compile().ops, vec![Op::Init]);
    }

    #[test]
    fn test_rule() {
        assert!(Rule::thick().compile().ops.contains(&Op::Rule { thickness: 2 }));
        assert!(Rule::new(0).compile().ops.contains(&Op::Rule { thickness: 1 }));
    }

    #[test]
    fn test_row_padding() {
        let row = TableRow::new(vec![
            Cell::left("Name", 8),
            Cell::right("1", 4),
            Cell::right("10", 5),
        ]);
        assert_eq!(row.line(), "Name      1    10");
        assert_eq!(row.line().chars().count(), 17);
    }

    #[test]
    fn test_row_truncates_long_text() {
        let row = TableRow::new(vec![Cell::left("Reinforced concrete", 8), Cell::left("t", 2)]);
        assert_eq!(row.line(), "Reinfo~ t ");
    }

    #[test]
    fn test_row_counts_chars() {
        let row = TableRow::new(vec![Cell::right("50 000 \u{20BD}", 10)]);
        assert_eq!(row.line().chars().count(), 10);
    }

    #[test]
    fn test_bold_row() {
        let ir = TableRow::new(vec![Cell::left("ITEM", 5)]).bold().compile();
        assert!(ir.ops.contains(&Op::SetBold(true)));
        assert!(ir.ops.contains(&Op::SetBold(false)));
    }
}
