//! Chat completion error types.

/// Failure conditions of a batch chat completion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChatErrorKind {
    /// Checkpoint, tokenizer, or serving backend could not be loaded.
    #[display("Load error: {_0}")]
    Load(String),
    /// A batch size or sequence length exceeded its configured maximum.
    #[display("Capacity exceeded: {what} is {requested}, limit is {limit}")]
    Capacity {
        /// The bounded quantity (e.g. "batch size")
        what: String,
        /// The requested amount
        requested: u64,
        /// The configured maximum
        limit: u64,
    },
    /// A conversation is empty, has an unknown role, or is badly ordered.
    #[display("Malformed conversation: {_0}")]
    MalformedConversation(String),
    /// Decoding or transport failed while generating.
    #[display("Generation error: {_0}")]
    Generation(String),
    /// Invalid generation parameters or settings.
    #[display("Configuration error: {_0}")]
    Config(String),
    /// The transcript could not be written.
    #[display("I/O error: {_0}")]
    Io(String),
}

impl From<std::io::Error> for ChatErrorKind {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl ChatErrorKind {
    /// Builds a [`ChatErrorKind::Capacity`] for the given quantity.
    pub fn capacity(what: impl Into<String>, requested: u64, limit: u64) -> Self {
        Self::Capacity {
            what: what.into(),
            requested,
            limit,
        }
    }
}

/// Chat error with location tracking.
///
/// # Examples
///
/// ```
/// use chat_batch_error::{ChatError, ChatErrorKind};
///
/// let err = ChatError::new(ChatErrorKind::MalformedConversation(
///     "conversation has no messages".to_string(),
/// ));
/// assert!(format!("{}", err).contains("no messages"));
/// assert!(matches!(err.kind(), ChatErrorKind::MalformedConversation(_)));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Chat Error: {} at line {} in {}", kind, line, file)]
pub struct ChatError {
    kind: ChatErrorKind,
    line: u32,
    file: &'static str,
}

impl ChatError {
    /// Create a new chat error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChatErrorKind {
        &self.kind
    }

    /// Line number where the error was raised.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Source file where the error was raised.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl<T> From<T> for ChatError
where
    T: Into<ChatErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result alias used across the workspace.
pub type ChatResult<T> = Result<T, ChatError>;
