use thiserror::Error;

pub type Result<T> = std::result::Result<T, YdayError>;

#[derive(Error, Debug)]
pub enum YdayError {
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("{tool} not found. {hint}")]
    ToolMissing { tool: String, hint: String },
    #[error("{tool} failed: {stderr}")]
    ToolFailed { tool: String, stderr: String },
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// gix errors are large; keep them boxed so `Result<T>` stays small
impl From<gix::object::commit::Error> for YdayError {
    fn from(err: gix::object::commit::Error) -> Self {
        YdayError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for YdayError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        YdayError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for YdayError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        YdayError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for YdayError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        YdayError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for YdayError {
    fn from(err: gix::objs::decode::Error) -> Self {
        YdayError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::discover::Error> for YdayError {
    fn from(err: gix::discover::Error) -> Self {
        YdayError::GitDiscover(Box::new(err))
    }
}
