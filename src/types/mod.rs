//! Type definitions shared by the wallet, chain and transfer modules

pub mod balance;
pub mod constants;
pub mod receipt;

// Re-export commonly used types
pub use balance::*;
pub use constants::*;
pub use receipt::*;
