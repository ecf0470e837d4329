pub mod id;
pub mod sink;
pub mod topic;
pub mod types;

pub use sink::FactSink;
pub use topic::Topic;
pub use types::*;
