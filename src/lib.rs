pub mod dataset;
pub mod reader;
pub mod records;
pub mod writer;
use core::fmt;

pub use dataset::{ElementBlock, ElementDataset, ElementShape, NodeDataset};
pub use records::{ElementRecord, NodeRecord};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
#[derive(Debug)]
pub struct Error(String);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unv error: {}", self.0)
    }
}

impl std::error::Error for Error {}

impl Error {
    #[must_use]
    pub fn from(msg: &str) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

// Set the log level for tests
#[allow(dead_code)]
fn init_log(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
