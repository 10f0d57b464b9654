use std::collections::VecDeque;
use std::fmt;
use std::io::{BufRead, Write};

/// The command letters understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `r`: rotation, one angle in degrees.
    Rotate,
    /// `s`: scale, two factors.
    Scale,
    /// `t`: translation, two offsets.
    Translate,
    /// `h`: shear, two factors.
    Shear,
    /// `d`: done, no parameters.
    Done,
}

impl CommandKind {
    /// Look up the command for a lower case letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'r' => Some(Self::Rotate),
            's' => Some(Self::Scale),
            't' => Some(Self::Translate),
            'h' => Some(Self::Shear),
            'd' => Some(Self::Done),
            _ => None,
        }
    }

    /// Number of numeric parameters that follow the letter.
    pub fn arity(&self) -> usize {
        match self {
            Self::Rotate => 1,
            Self::Scale | Self::Translate | Self::Shear => 2,
            Self::Done => 0,
        }
    }

    fn parameter_label(&self) -> &'static str {
        match self {
            Self::Rotate => "rotation angle",
            Self::Scale => "scale values",
            Self::Translate => "translation values",
            Self::Shear => "shear values",
            Self::Done => "done parameters",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rotate => "rotation",
            Self::Scale => "scale",
            Self::Translate => "translation",
            Self::Shear => "shear",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// A single transform command with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Rotate about the origin by an angle in degrees.
    Rotate {
        /// counter-clockwise angle in degrees.
        degrees: f64,
    },
    /// Scale the axes independently.
    Scale {
        /// horizontal factor.
        sx: f64,
        /// vertical factor.
        sy: f64,
    },
    /// Translate by an offset.
    Translate {
        /// horizontal offset.
        tx: f64,
        /// vertical offset.
        ty: f64,
    },
    /// Shear the axes.
    Shear {
        /// factor added to the x row (x' = x + hx * y).
        hx: f64,
        /// factor added to the y row (y' = y + hy * x).
        hy: f64,
    },
    /// Stop accumulating.
    Done,
}

impl Command {
    /// The letter this command was issued with.
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Rotate { .. } => CommandKind::Rotate,
            Self::Scale { .. } => CommandKind::Scale,
            Self::Translate { .. } => CommandKind::Translate,
            Self::Shear { .. } => CommandKind::Shear,
            Self::Done => CommandKind::Done,
        }
    }

    /// Returns true if every parameter is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            Self::Rotate { degrees } => degrees.is_finite(),
            Self::Scale { sx: a, sy: b }
            | Self::Translate { tx: a, ty: b }
            | Self::Shear { hx: a, hy: b } => a.is_finite() && b.is_finite(),
            Self::Done => true,
        }
    }

    fn from_params(kind: CommandKind, p: [f64; 2]) -> Self {
        match kind {
            CommandKind::Rotate => Self::Rotate { degrees: p[0] },
            CommandKind::Scale => Self::Scale { sx: p[0], sy: p[1] },
            CommandKind::Translate => Self::Translate { tx: p[0], ty: p[1] },
            CommandKind::Shear => Self::Shear { hx: p[0], hy: p[1] },
            CommandKind::Done => Self::Done,
        }
    }
}

/// An error reading or applying a single command.
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    /// The token is not one of the command letters.
    #[error("invalid command '{0}', enter r, s, t, h, d")]
    InvalidCommand(String),

    /// A known command letter without the numeric parameters it needs.
    #[error("invalid {}", .0.parameter_label())]
    InvalidParameters(CommandKind),

    /// A known command whose parameters parsed but are NaN or infinite.
    #[error("invalid {}: parameters must be finite", .0.parameter_label())]
    NonFiniteParameters(CommandKind),

    /// The underlying stream failed.
    #[error("failed to read commands. {0}")]
    Io(#[from] std::io::Error),
}

/// Reads whitespace separated commands from a text stream.
///
/// Tokens may span lines. The command token is matched case-insensitively and must be a
/// single letter. Parameters are read one token at a time; the first token that is not a
/// number is left in the stream and becomes the next command token.
///
/// # Example
///
/// ```
/// use warper::{Command, CommandReader};
///
/// let mut reader = CommandReader::new("R 90\ns 2\n1 d".as_bytes());
///
/// assert_eq!(reader.next().unwrap().unwrap(), Command::Rotate { degrees: 90.0 });
/// assert_eq!(reader.next().unwrap().unwrap(), Command::Scale { sx: 2.0, sy: 1.0 });
/// assert_eq!(reader.next().unwrap().unwrap(), Command::Done);
/// assert!(reader.next().is_none());
/// ```
pub struct CommandReader<R> {
    reader: R,
    tokens: VecDeque<String>,
    prompt: Option<Box<dyn Write>>,
    finished: bool,
}

impl<R: BufRead> CommandReader<R> {
    /// Create a reader over a buffered text stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            tokens: VecDeque::new(),
            prompt: None,
            finished: false,
        }
    }

    /// Write `"> "` to `out` before reading each command.
    pub fn with_prompt(mut self, out: impl Write + 'static) -> Self {
        self.prompt = Some(Box::new(out));
        self
    }

    /// Make sure at least one token is buffered. Returns false at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced, so they surface as invalid tokens.
    fn fill(&mut self) -> std::io::Result<bool> {
        let mut line = Vec::new();
        while self.tokens.is_empty() {
            line.clear();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(false);
            }
            self.tokens.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_owned),
            );
        }
        Ok(true)
    }

    fn read_params(&mut self, kind: CommandKind) -> Result<Command, CommandError> {
        let mut params = [0.0; 2];
        for param in params.iter_mut().take(kind.arity()) {
            if !self.fill()? {
                return Err(CommandError::InvalidParameters(kind));
            }
            let value = self
                .tokens
                .front()
                .and_then(|token| token.parse::<f64>().ok())
                .ok_or(CommandError::InvalidParameters(kind))?;
            self.tokens.pop_front();
            *param = value;
        }
        Ok(Command::from_params(kind, params))
    }

    /// Read the next command.
    ///
    /// Returns `Ok(None)` at end of input. Recoverable errors leave the reader positioned at
    /// the next token, so reading can simply continue.
    pub fn read_command(&mut self) -> Result<Option<Command>, CommandError> {
        if let Some(out) = self.prompt.as_mut() {
            write!(out, "> ")?;
            out.flush()?;
        }

        if !self.fill()? {
            return Ok(None);
        }
        let token = self.tokens.pop_front().unwrap_or_default().to_lowercase();

        let mut letters = token.chars();
        let kind = match (letters.next(), letters.next()) {
            (Some(letter), None) => CommandKind::from_letter(letter),
            _ => None,
        };

        match kind {
            Some(kind) => self.read_params(kind).map(Some),
            None => Err(CommandError::InvalidCommand(token)),
        }
    }
}

impl<R: BufRead> Iterator for CommandReader<R> {
    type Item = Result<Command, CommandError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_command() {
            Ok(Some(command)) => Some(Ok(command)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                if matches!(e, CommandError::Io(_)) {
                    self.finished = true;
                }
                Some(Err(e))
            }
        }
    }
}
