//! A console calculator core: expressions over `+ - * / ^`, `sin`, `cos` and
//! `ln`, named variables, and single-parameter text macros expanded before
//! parsing.
//!
//! ```
//! use macro_calc::Session;
//!
//! let mut session = Session::new();
//! session.handle("$r(x)=x+2").unwrap();
//! assert_eq!(session.handle("r(2)*2").unwrap(), "x0 = 8");
//! ```

#![allow(nonstandard_style)]

pub mod error_handling;
pub mod evaluating;
pub mod expanding;
pub mod handling;
pub mod parsing;
pub mod scanning;

pub use error_handling::{CalcError, ErrorKind, Result};
pub use handling::Session;
