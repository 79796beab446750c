//! A small, embeddable Tcl-family scripting interpreter. The kernel —
//! tokenizer, substitution engine, variable/scope model, and command
//! registry — lives in [`interp`]; the built-in command catalogue lives
//! in [`commands`] and is wired in automatically by [`Interp::new`].
//!
//! ```
//! use picol_core::Interp;
//!
//! let mut interp = Interp::new();
//! let result = interp.eval("set x [expr 2 + 3]; set x").unwrap();
//! assert_eq!(result.value, "5");
//! ```

pub mod commands;
pub mod error;
pub mod glob;
pub mod handles;
pub mod interp;
pub mod limits;
pub mod list;
pub mod parser;
pub mod value;

pub use error::{Completion, EvalResult, Flow, InterpError};
pub use handles::Handle;
pub use interp::Interp;
pub use parser::{Parser, TokenKind};
