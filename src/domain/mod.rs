mod money;
mod session;
mod store;
mod transaction;

pub use money::*;
pub use session::*;
pub use store::*;
pub use transaction::*;
