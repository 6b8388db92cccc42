pub mod deadline;
pub mod logging;

pub use deadline::Deadline;
pub use logging::init_logging;
