pub mod error;
pub mod history;
pub mod sip;
pub mod swp;
pub mod tvm;
pub mod types;

pub use error::InvestorCalcError;
pub use types::*;

/// Standard result type for all investor-calc operations
pub type InvestorCalcResult<T> = Result<T, InvestorCalcError>;
