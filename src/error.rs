//! The error channel and the unified-return-code design from spec §9:
//! a single `thiserror` enum propagated with `?` for the ERR channel,
//! kept entirely separate from [`Flow`], the small tagged value that
//! carries BREAK/CONTINUE/RETURN through the evaluator without being
//! smuggled through the result string the way the reference
//! implementation's integer return codes are.

/// The taxonomy of error categories a command can raise. All variants
/// carry the same kind of payload (a human-readable message, the thing
/// that ends up in `i->result` and, decorated with a traceback, in
/// `::errorInfo`) — the categories exist so embedders and `catch` sites
/// that care can match on them, not because they're handled differently
/// internally.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InterpError {
    /// Malformed script syntax: unmatched braces, brackets, quotes.
    #[error("{0}")]
    Parse(String),
    /// Unknown command, procedure, or variable name.
    #[error("{0}")]
    Name(String),
    /// Wrong number of arguments to a command or procedure.
    #[error("{0}")]
    Arity(String),
    /// A value did not have the shape a command required (not an integer,
    /// not a list, not a valid handle, ...).
    #[error("{0}")]
    Type(String),
    /// An index or count fell outside the bounds a command required.
    #[error("{0}")]
    Range(String),
    /// Arithmetic failure: division by zero, unknown operator.
    #[error("{0}")]
    Arithmetic(String),
    /// A host-facing operation failed (I/O, process, clock).
    #[error("{0}")]
    Host(String),
    /// A resource limit was hit (recursion depth, ...).
    #[error("{0}")]
    Resource(String),
    /// Raised by script code itself via the `error` command.
    #[error("{0}")]
    User(String),
}

impl InterpError {
    /// The raw, undecorated message — what ends up in `i->result`.
    pub fn message(&self) -> &str {
        match self {
            InterpError::Parse(s)
            | InterpError::Name(s)
            | InterpError::Arity(s)
            | InterpError::Type(s)
            | InterpError::Range(s)
            | InterpError::Arithmetic(s)
            | InterpError::Host(s)
            | InterpError::Resource(s)
            | InterpError::User(s) => s,
        }
    }
}

/// The non-local control-flow signal a completed evaluation can carry,
/// distinct from (and alongside) its result value. `Normal` is the
/// common case; the other three are what `break`, `continue`, and
/// `return` leave behind for an enclosing loop or procedure call to
/// intercept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Normal,
    Break,
    Continue,
    Return,
}

/// The outcome of evaluating a script or command: a value paired with
/// the flow signal it completed with.
#[derive(Debug, Clone)]
pub struct Completion {
    pub flow: Flow,
    pub value: String,
}

impl Completion {
    pub fn normal(value: impl Into<String>) -> Self {
        Completion {
            flow: Flow::Normal,
            value: value.into(),
        }
    }

    pub fn signal(flow: Flow, value: impl Into<String>) -> Self {
        Completion {
            flow,
            value: value.into(),
        }
    }

    pub fn is_normal(&self) -> bool {
        self.flow == Flow::Normal
    }
}

/// The result type threaded through the entire evaluator: `Ok` carries a
/// [`Completion`] (whose `flow` the caller must inspect), `Err` carries
/// the single unified [`InterpError`] channel.
pub type EvalResult = Result<Completion, InterpError>;
