//! # Document Renderer
//!
//! Projects a [`Document`] onto the fixed sheet template as an IR
//! [`Program`]. The renderer holds only immutable configuration, so every
//! call is a fresh projection and re-rendering after a mutation is simply
//! calling [`DocumentRenderer::render`] again.
//!
//! ## Layout
//!
//! ```text
//!                 STROYPROEKT LLC              (bold, double size)
//!                 CHECK No. 001                (bold)
//!                 dated 2024-05-01
//!                 Client: Builder Co           (check only, if set)
//! ══════════════════════════════════════════
//! ITEM            QTY  UNIT   PRICE     TOTAL  (bold)
//! ══════════════════════════════════════════
//! Cement M400      10  t      5 000  50 000 ₽
//! ──────────────────────────────────────────
//!                           TOTAL: 50 000 ₽    (bold, double size)
//! ```
//!
//! A report replaces everything below the header with its text, verbatim.

use serde::Deserialize;

use crate::components::{Cell, ComponentExt, Rule, Sheet, Spacer, TableRow, Text, TextBlock};
use crate::document::{Document, DocumentKind, LineItem};
use crate::ir::Program;
use crate::totals::{Locale, Totals};

/// Text labels of the sheet template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub check_title: String,
    pub report_title: String,
    pub number_prefix: String,
    pub date_prefix: String,
    pub client_prefix: String,
    pub total_prefix: String,
    /// Column headers in display order: name, quantity, unit, price, total.
    pub columns: [String; 5],
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            check_title: "CHECK".to_string(),
            report_title: "REPORT".to_string(),
            number_prefix: "No.".to_string(),
            date_prefix: "dated".to_string(),
            client_prefix: "Client:".to_string(),
            total_prefix: "TOTAL:".to_string(),
            columns: [
                "ITEM".to_string(),
                "QTY".to_string(),
                "UNIT".to_string(),
                "PRICE".to_string(),
                "TOTAL".to_string(),
            ],
        }
    }
}

impl Labels {
    pub fn title(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Check => &self.check_title,
            DocumentKind::Report => &self.report_title,
        }
    }
}

/// Column widths (in characters) of the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub name: usize,
    pub quantity: usize,
    pub unit: usize,
    pub price: usize,
    pub total: usize,
}

impl TableLayout {
    /// Split `columns` characters in the 30:10:8:14:18 proportion of the
    /// 80-column template; the total column takes the remainder.
    pub fn for_columns(columns: usize) -> Self {
        let name = columns * 30 / 80;
        let quantity = columns * 10 / 80;
        let unit = columns * 8 / 80;
        let price = columns * 14 / 80;
        let total = columns.saturating_sub(name + quantity + unit + price);
        Self {
            name,
            quantity,
            unit,
            price,
            total,
        }
    }
}

/// Builds the visual representation of a document.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    locale: Locale,
    labels: Labels,
    columns: usize,
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new(Locale::default(), Labels::default(), 80)
    }
}

impl DocumentRenderer {
    pub fn new(locale: Locale, labels: Labels, columns: usize) -> Self {
        Self {
            locale,
            labels,
            columns: columns.max(10),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Render the active body of `doc`.
    pub fn render(&self, doc: &Document) -> Program {
        let kind = doc.active_kind();
        let sheet = self.header(doc, kind);

        let sheet = match kind {
            DocumentKind::Check => self.check_body(sheet, doc.items()),
            DocumentKind::Report => sheet.child(TextBlock::new(
                doc.report().body_text.clone(),
                self.columns,
            )),
        };

        sheet.compile()
    }

    fn header(&self, doc: &Document, kind: DocumentKind) -> Sheet {
        let header = doc.header();
        let mut sheet = Sheet::new()
            .child(Text::new(header.company_name.clone()).center().bold().size(2))
            .child(Spacer::px(4))
            .child(
                Text::new(format!(
                    "{} {} {}",
                    self.labels.title(kind),
                    self.labels.number_prefix,
                    header.document_number
                ))
                .center()
                .bold(),
            )
            .child(Text::new(format!("{} {}", self.labels.date_prefix, header.document_date)).center());

        if kind == DocumentKind::Check
            && let Some(client) = doc.client_name()
        {
            sheet = sheet
                .child(Spacer::px(4))
                .child(Text::new(format!("{} {}", self.labels.client_prefix, client)).center());
        }

        sheet.child(Spacer::px(24))
    }

    fn check_body(&self, sheet: Sheet, items: &[LineItem]) -> Sheet {
        let layout = TableLayout::for_columns(self.columns);
        let totals = Totals::compute(items);
        let [name, quantity, unit, price, total] = &self.labels.columns;

        let mut sheet = sheet
            .child(Rule::thick())
            .child(Spacer::px(4))
            .child(
                TableRow::new(vec![
                    Cell::left(name.clone(), layout.name),
                    Cell::right(quantity.clone(), layout.quantity),
                    Cell::left(unit.clone(), layout.unit),
                    Cell::right(price.clone(), layout.price),
                    Cell::right(total.clone(), layout.total),
                ])
                .bold(),
            )
            .child(Spacer::px(4))
            .child(Rule::thick());

        for (item, item_total) in items.iter().zip(&totals.items) {
            sheet = sheet
                .child(Spacer::px(4))
                .child(TableRow::new(vec![
                    Cell::left(item.name(), layout.name),
                    Cell::right(self.locale.format_number(item.quantity()), layout.quantity),
                    Cell::left(item.unit(), layout.unit),
                    Cell::right(self.locale.format_number(item.price()), layout.price),
                    Cell::right(self.locale.format_amount(item_total.total), layout.total),
                ]))
                .child(Spacer::px(4))
                .child(Rule::thin());
        }

        sheet
            .child(Spacer::px(16))
            .child(Rule::thick())
            .child(Spacer::px(8))
            .child(
                Text::new(format!(
                    "{} {}",
                    self.labels.total_prefix,
                    self.locale.format_amount(totals.grand_total)
                ))
                .right()
                .bold()
                .size(2),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DocumentDefaults;
    use crate::document::{HeaderField, ItemUpdate};
    use crate::ir::Op;
    use pretty_assertions::assert_eq;

    fn doc() -> Document {
        Document::new(&DocumentDefaults {
            document_date: Some("2024-05-01".into()),
            ..DocumentDefaults::default()
        })
    }

    fn renderer() -> DocumentRenderer {
        DocumentRenderer::new(Locale::en_us(), Labels::default(), 80)
    }

    #[test]
    fn test_table_layout_sums_to_columns() {
        for columns in [10, 40, 80, 97, 120] {
            let l = TableLayout::for_columns(columns);
            assert_eq!(l.name + l.quantity + l.unit + l.price + l.total, columns);
        }
        assert_eq!(
            TableLayout::for_columns(80),
            TableLayout { name: 30, quantity: 10, unit: 8, price: 14, total: 18 }
        );
    }

    #[test]
    fn test_check_header() {
        let lines = renderer().render(&doc()).text_lines();
        assert_eq!(lines[0], "StroyProekt LLC");
        assert_eq!(lines[1], "CHECK No. 001");
        assert_eq!(lines[2], "dated 2024-05-01");
        assert!(!lines.iter().any(|l| l.starts_with("Client:")));
    }

    #[test]
    fn test_client_line_when_set() {
        let mut doc = doc();
        doc.set_header(HeaderField::ClientName("Builder Co".into()));
        let lines = renderer().render(&doc).text_lines();
        assert_eq!(lines[3], "Client: Builder Co");
    }

    #[test]
    fn test_table_column_order() {
        let lines = renderer().render(&doc()).text_lines();
        let header = lines.iter().find(|l| l.starts_with("ITEM")).unwrap();
        let positions: Vec<usize> = ["ITEM", "QTY", "UNIT", "PRICE", "TOTAL"]
            .iter()
            .map(|label| header.find(label).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(header.chars().count(), 80);
    }

    #[test]
    fn test_item_row_and_grand_total() {
        let mut doc = doc();
        let id = doc.add_item();
        doc.update_item(id, ItemUpdate::Name("Gravel".into()));
        doc.update_item(id, ItemUpdate::Quantity(2.0));
        doc.update_item(id, ItemUpdate::Price(100.0));

        let lines = renderer().render(&doc).text_lines();
        let seed = lines.iter().find(|l| l.starts_with("Cement M400")).unwrap();
        assert!(seed.ends_with("$50,000"));
        assert!(seed.contains("5,000"));

        let gravel = lines.iter().find(|l| l.starts_with("Gravel")).unwrap();
        assert!(gravel.ends_with("$200"));

        assert_eq!(lines.last().unwrap(), "TOTAL: $50,200");
    }

    #[test]
    fn test_rows_follow_item_order() {
        let mut doc = doc();
        let a = doc.add_item();
        doc.update_item(a, ItemUpdate::Name("Alpha".into()));
        let b = doc.add_item();
        doc.update_item(b, ItemUpdate::Name("Beta".into()));

        let lines = renderer().render(&doc).text_lines();
        let pos = |name: &str| lines.iter().position(|l| l.starts_with(name)).unwrap();
        assert!(pos("Cement") < pos("Alpha"));
        assert!(pos("Alpha") < pos("Beta"));
    }

    #[test]
    fn test_grand_total_uses_locale_convention() {
        let lines = DocumentRenderer::default().render(&doc()).text_lines();
        assert_eq!(lines.last().unwrap(), "TOTAL: 50\u{00A0}000 \u{20BD}");
    }

    #[test]
    fn test_report_body_verbatim() {
        let mut doc = doc();
        doc.set_header(HeaderField::ClientName("Hidden".into()));
        doc.set_report_text("Line *one*\n\n  indented <tag>");
        doc.switch_kind(DocumentKind::Report);

        let program = renderer().render(&doc);
        let lines = program.text_lines();
        assert_eq!(lines[1], "REPORT No. 001");
        assert!(!lines.iter().any(|l| l.contains("Hidden")));
        assert!(!lines.iter().any(|l| l.starts_with("ITEM")));
        assert_eq!(&lines[lines.len() - 3..], ["Line *one*", "", "  indented <tag>"]);
        assert!(!program.ops.iter().any(|op| matches!(op, Op::Rule { .. })));
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = doc();
        let r = renderer();
        assert_eq!(r.render(&doc), r.render(&doc));
    }

    #[test]
    fn test_render_reflects_mutation() {
        let mut doc = doc();
        let r = renderer();
        let before = r.render(&doc);
        doc.set_header(HeaderField::DocumentNumber("002".into()));
        let after = r.render(&doc);
        assert_ne!(before, after);
        assert!(after.text_lines().contains(&"CHECK No. 002".to_string()));
    }

    #[test]
    fn test_empty_check_renders_zero_total() {
        let r = renderer();
        let lines = r.render(&Document::empty()).text_lines();
        assert_eq!(lines.last().unwrap(), "TOTAL: $0");
    }
}
