// Interview engine: role catalog, session store, state machine, and the two
// model-backed steps (next question, final feedback).
// All model calls go through llm_client — nothing here talks HTTP to the provider.

pub mod feedback;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod roles;
pub mod session;
pub mod state_machine;
pub mod store;
pub mod transcript;
