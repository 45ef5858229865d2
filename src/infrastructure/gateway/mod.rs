//! Provider gateway adapters

mod chat_completions;
mod mock;
mod router;

pub use chat_completions::ChatCompletionsGateway;
pub use mock::MockGateway;
pub use router::ProviderRouter;
