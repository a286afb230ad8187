pub mod agent;
pub mod conversation;
pub mod render;
pub mod transcript;

pub use agent::ChatAgent;
pub use conversation::{ConversationLoop, TurnPhase, TurnReport};
pub use transcript::{Role, Transcript};
