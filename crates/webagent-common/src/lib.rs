pub mod errors;
pub mod events;
pub mod id;
pub mod transcript;

pub use errors::{ConfigError, HostError, PlatformError, WebAgentError};
pub use events::{OutputBus, OutputEvent, OutputLevel};
pub use id::{new_id, RunId};
pub use transcript::Transcript;

pub type Result<T> = std::result::Result<T, WebAgentError>;
