//! # Declarative Components
//!
//! Building blocks for the document sheet. Each component describes *what*
//! to show and emits IR ops; the renderer composes them into a [`Sheet`].
//!
//! ```
//! use docflow::components::*;
//!
//! let sheet = Sheet::new()
//!     .child(Text::new("STROYPROEKT LLC").center().bold().size(2))
//!     .child(Spacer::px(8))
//!     .child(Rule::thick())
//!     .child(TableRow::new(vec![
//!         Cell::left("Cement M400", 30),
//!         Cell::right("50 000", 50),
//!     ]));
//!
//! let ir = sheet.compile();
//! println!("{:#?}", ir);
//! ```

mod layout;
mod sheet;
mod text;

pub use layout::*;
pub use sheet::*;
pub use text::*;

use crate::ir::{Op, Program};

/// Trait for declarative components.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

/// Extension trait for compiling components.
pub trait ComponentExt: Component {
    /// Compile this component to an IR program.
    ///
    /// The program starts with an Init op, followed by the component's ops.
    fn compile(&self) -> Program {
        let mut ops = vec![Op::Init];
        self.emit(&mut ops);
        Program { ops }
    }
}

impl<T: Component> ComponentExt for T {}
