pub mod intake;
mod run;

pub use run::{run_transcript, AgentRun, Phase, RECORD_SEPARATOR};
