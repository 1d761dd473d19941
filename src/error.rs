use std::fmt::{Debug, Display};

/// The stage of the pipeline that failed.
///
/// Every kind is terminal: nothing is retried, the binary reports it and exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Config,
    Network,
    Read,
    DecodeInit,
    HeaderRead,
    Transform,
    FileExists,
    Write,
}

impl ErrorKind {
    /// Human-readable name of the failing stage, used as the diagnostic prefix
    pub fn stage(&self) -> &'static str {
        match self {
            ErrorKind::Config => "invalid configuration",
            ErrorKind::Network => "http fetch failed",
            ErrorKind::Read => "failed to read input",
            ErrorKind::DecodeInit => "error decoding image",
            ErrorKind::HeaderRead => "error reading image header",
            ErrorKind::Transform => "error transforming image",
            ErrorKind::FileExists => "output file exists",
            ErrorKind::Write => "error writing out resized image",
        }
    }
}

pub struct ResizeError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ResizeError {
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl Display for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.kind.stage(), self.message)
    }
}

impl Debug for ResizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for ResizeError {}

#[macro_export]
macro_rules! ro_err {
    ($kind:expr, $fmt:literal $(,)?) => {
        $crate::error::ResizeError::new(
            $kind,
            format!("{} @ {}:{}:{}", format_args!($fmt), file!(), line!(), column!()),
        )
    };
    ($kind:expr, $fmt:literal, $($arg:tt)+) => {
        $crate::error::ResizeError::new(
            $kind,
            format!("{} @ {}:{}:{}", format_args!($fmt, $($arg)+), file!(), line!(), column!()),
        )
    };
    ($kind:expr, $msg:expr $(,)?) => {
        $crate::error::ResizeError::new(
            $kind,
            format!("{} @ {}:{}:{}", $msg, file!(), line!(), column!()),
        )
    };
}

#[macro_export]
macro_rules! ro_try {
    ($kind:expr, $expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::ro_err!($kind, err));
            }
        }
    };
}
