use warper_imgproc::warp::{rotate, scale, shear, translate};
use warper_linalg::Mat3;

use crate::command::{Command, CommandError};

/// Where the interpreter is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpreterState {
    /// Folding commands into the matrix.
    #[default]
    Accumulating,
    /// `d` was seen, the matrix is final.
    Done,
}

/// An error that ends interpretation without a final matrix.
#[derive(thiserror::Error, Debug)]
pub enum InterpreterError {
    /// The command stream ended before `d`.
    #[error("command stream ended before 'd'")]
    UnexpectedEnd,

    /// The command stream failed.
    #[error("failed to read commands. {0}")]
    Io(#[from] std::io::Error),
}

/// Folds transform commands into an accumulated matrix.
///
/// Every command left-multiplies the accumulator, so after commands `E1 .. En` the matrix is
/// `En * .. * E1`. Once `d` has been applied further commands are ignored.
///
/// # Example
///
/// ```
/// use warper::{Command, Interpreter, InterpreterState};
///
/// let mut interpreter = Interpreter::new();
/// interpreter.apply(Command::Scale { sx: 2.0, sy: 3.0 }).unwrap();
/// let state = interpreter.apply(Command::Done).unwrap();
///
/// assert_eq!(state, InterpreterState::Done);
/// assert_eq!(interpreter.matrix()[(1, 1)], 3.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    state: InterpreterState,
    matrix: Mat3,
}

impl Interpreter {
    /// Start accumulating from the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lifecycle state.
    pub fn state(&self) -> InterpreterState {
        self.state
    }

    /// The matrix accumulated so far.
    pub fn matrix(&self) -> Mat3 {
        self.matrix
    }

    /// Applies a single command.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NonFiniteParameters`] and leaves the matrix unchanged if any
    /// parameter is NaN or infinite.
    pub fn apply(&mut self, command: Command) -> Result<InterpreterState, CommandError> {
        if self.state == InterpreterState::Done {
            log::debug!("ignoring {:?} after done", command);
            return Ok(self.state);
        }

        if !command.is_finite() {
            return Err(CommandError::NonFiniteParameters(command.kind()));
        }

        self.matrix = match command {
            Command::Rotate { degrees } => rotate(self.matrix, degrees),
            Command::Scale { sx, sy } => scale(self.matrix, sx, sy),
            Command::Translate { tx, ty } => translate(self.matrix, tx, ty),
            Command::Shear { hx, hy } => shear(self.matrix, hx, hy),
            Command::Done => {
                self.state = InterpreterState::Done;
                self.matrix
            }
        };

        log::debug!("applied {:?}", command);
        Ok(self.state)
    }

    /// Consumes commands until `d` and returns the final matrix.
    ///
    /// Recoverable errors are logged, passed to `report` and skipped; the matrix is left as it
    /// was before the failed command.
    ///
    /// # Errors
    ///
    /// * [`InterpreterError::UnexpectedEnd`] if the commands run out before `d`.
    /// * [`InterpreterError::Io`] if the command stream fails.
    pub fn run<I>(
        &mut self,
        commands: I,
        mut report: impl FnMut(&CommandError),
    ) -> Result<Mat3, InterpreterError>
    where
        I: IntoIterator<Item = Result<Command, CommandError>>,
    {
        if self.state == InterpreterState::Done {
            return Ok(self.matrix);
        }

        for command in commands {
            match command.and_then(|c| self.apply(c)) {
                Ok(InterpreterState::Done) => return Ok(self.matrix),
                Ok(InterpreterState::Accumulating) => {}
                Err(CommandError::Io(e)) => return Err(InterpreterError::Io(e)),
                Err(e) => {
                    log::warn!("{e}");
                    report(&e);
                }
            }
        }

        Err(InterpreterError::UnexpectedEnd)
    }
}
