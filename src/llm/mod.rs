mod client;
mod daemon;
mod hosted;
mod pipeline;
mod types;

pub use client::{InferenceBackend, create_backend};
pub use daemon::{DAEMON_TIMEOUT, DaemonBackend};
pub use hosted::HostedApiBackend;
pub use pipeline::{CompletionPipeline, LocalPipelineBackend, TextGenerator, load_pipeline};
pub use types::*;
