#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use warper_image as image;

#[doc(inline)]
pub use warper_imgproc as imgproc;

#[doc(inline)]
pub use warper_io as io;

#[doc(inline)]
pub use warper_linalg as linalg;

/// Transform commands and the token reader that produces them.
pub mod command;

/// Error type for the end-to-end pipeline.
pub mod error;

/// State machine folding commands into an accumulated transform.
pub mod interpreter;

/// Ingest, transform and emit stages.
pub mod pipeline;

pub use command::{Command, CommandError, CommandKind, CommandReader};
pub use error::WarperError;
pub use interpreter::{Interpreter, InterpreterError, InterpreterState};
pub use pipeline::Pipeline;
