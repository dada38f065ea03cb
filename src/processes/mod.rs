pub mod main_process;
pub mod message_consumer;

pub use main_process::{run_ingest_pipeline, run_main_process};
pub use message_consumer::{LineOutcome, MessageConsumer};
