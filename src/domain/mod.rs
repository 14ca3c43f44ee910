mod budget;
mod entry;
mod ledger;
mod money;
mod month;
mod validation;

pub use budget::*;
pub use entry::*;
pub use ledger::*;
pub use money::*;
pub use month::*;
pub use validation::*;
