// Application layer - orchestration over the domain store and the
// persistence gateway. Clients (CLI, TUI, API) talk to LedgerService only.

pub mod error;
mod service;

pub use error::*;
pub use service::*;
