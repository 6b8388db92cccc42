pub mod parser;
pub mod matcher;
pub mod processor;

pub use parser::ParserConfig;
pub use matcher::{MatcherConfig, MatchStrategy};
pub use processor::ProcessorConfig;
