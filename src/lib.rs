pub mod cli;
pub mod error;
pub mod git;
pub mod ingest;
pub mod model;
pub mod output;
pub mod report;
pub mod timeline;
pub mod timespan;
pub mod util;
pub mod validate;

pub use ingest::ingest;
pub use timeline::render;
pub use timespan::{resolve, Directive};
pub use validate::validate;
