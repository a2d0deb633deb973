pub mod chain;
pub mod error;
pub mod score;
pub mod snapshot;
pub mod wallet;

pub use chain::*;
pub use error::*;
pub use score::*;
pub use snapshot::*;
pub use wallet::*;
