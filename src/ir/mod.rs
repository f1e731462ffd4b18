//! # Intermediate Representation (IR)
//!
//! The IR is the visual tree of a rendered document: a flat, inspectable
//! sequence of drawing ops that sits between declarative components and
//! the rasterizer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌────────────┐     ┌──────────┐
//! │ Components  │ ──► │     IR      │ ──► │ Rasterizer │ ──► │ Encoder  │
//! │(declarative)│     │  (Vec<Op>)  │     │  (bitmap)  │     │(JPEG/PNG)│
//! └─────────────┘     └─────────────┘     └────────────┘     └──────────┘
//! ```
//!
//! A [`Program`] is a value: cloning it snapshots the rendered surface, and
//! two renders of the same document compare equal.
//!
//! ## Example
//!
//! ```
//! use docflow::ir::{Alignment, Op, Program};
//!
//! let mut program = Program::with_init();
//! program.push(Op::SetAlign(Alignment::Center));
//! program.push(Op::SetBold(true));
//! program.push(Op::Text("HELLO".into()));
//! program.push(Op::Newline);
//!
//! println!("{:#?}", program);
//! ```

mod ops;

pub use ops::*;
