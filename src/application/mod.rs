// Application layer: the Ledger component and the types it hands to clients.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
