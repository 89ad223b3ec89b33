//! Volume event bridge core
//!
//! Converts raw volume-level changes from a platform backend into discrete
//! directional button events:
//!
//! 1. The lifecycle state machine gates samples on `Listening`
//! 2. The debounce gate collapses notification bursts into one press
//! 3. The classifier labels the change up/down (no-op changes are dropped)
//! 4. The event is delivered to the registered consumer, fire-and-forget
//! 5. In swallow mode, a delayed restore reverses the audible change
//!
//! All state is confined to [`actor::BridgeActor`]; callers interact through
//! [`handle::BridgeHandle`].

pub mod actor;
pub mod classify;
pub mod commands;
pub mod debounce;
pub mod handle;
pub mod restore;

pub use actor::BridgeActor;
pub use commands::{BridgeStatus, ConsumerFn};
pub use handle::BridgeHandle;

#[cfg(test)]
mod tests;
