use reqwest::StatusCode;
use std::{fmt, io};
use strum::{AsRefStr, EnumString};

macro_rules! anyhow {
    ($fmt:literal $($args:tt)*) => {
        $crate::anyhow!(@Unspecified $fmt $($args)*)
    };
    (@$kind:ident $(($name:literal => $val:expr))* $fmt:literal $($args:tt)*) => {
        $crate::Error::new($crate::ErrorKind::$kind, Some(anyhow::anyhow!($fmt $($args)*)))
            .with_metadata(vec![$(($name, $val.to_string())),*])
    };
    (@$kind:ident $(($name:literal => $val:expr))*) => {
        $crate::Error::new($crate::ErrorKind::$kind, None)
            .with_metadata(vec![$(($name, $val.to_string())),*])
    };
}
pub(crate) use anyhow;

macro_rules! bail {
    ($($t:tt)*) => {
        return Err($crate::anyhow!($($t)*).into())
    };
}
pub(crate) use bail;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub source: Option<anyhow::Error>,
    pub metadata: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        for (key, value) in &self.metadata {
            write!(f, " [{key}={value}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

impl Error {
    pub fn new(kind: ErrorKind, source: Option<anyhow::Error>) -> Self {
        Self {
            kind,
            source,
            metadata: Vec::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Vec<(&'static str, String)>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Wraps the source with `context`, keeping the kind.
    pub fn context<C>(mut self, context: C) -> Self
    where
        C: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.source = Some(match self.source {
            Some(err) => err.context(context),
            None => anyhow::Error::msg(context),
        });
        self
    }

    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub trait Context<T> {
    fn kind(self, kind: ErrorKind) -> Result<T>;

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + fmt::Debug + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Into<Error>,
{
    fn kind(self, kind: ErrorKind) -> Result<T> {
        self.map_err(|err| err.into().with_kind(kind))
    }

    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: fmt::Display + fmt::Debug + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|err| err.into().context(context()))
    }
}

impl<T> Context<T> for Option<T> {
    fn kind(self, kind: ErrorKind) -> Result<T> {
        self.ok_or_else(|| Error::new(kind, None))
    }

    /// A missing value is an `InvalidState` error.
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: fmt::Display + fmt::Debug + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.kind(ErrorKind::InvalidState).with_context(context)
    }
}

#[derive(EnumString, AsRefStr, Debug, Default, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    #[default]
    Unspecified,

    IOError,
    NetworkError,
    DecodeError,
    StorageError,

    HttpStatus,
    Unauthenticated,
    NotFound,

    InvalidArgument,
    InvalidState,
}
impl ErrorKind {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Unauthenticated,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            _ => ErrorKind::HttpStatus,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::new(ErrorKind::IOError, Some(err.into()))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if let Some(status) = err.status() {
            ErrorKind::from_status(status)
        } else if err.is_decode() {
            ErrorKind::DecodeError
        } else {
            ErrorKind::NetworkError
        };
        let status = err.status().map(|it| it.as_u16().to_string());
        let error = Error::new(kind, Some(err.into()));
        match status {
            Some(status) => error.with_metadata(vec![("status", status)]),
            None => error,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::new(ErrorKind::InvalidArgument, Some(err.into()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::DecodeError, Some(err.into()))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::new(ErrorKind::InvalidArgument, Some(err.into()))
    }
}
