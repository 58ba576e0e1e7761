//! Chain access for balance queries and transfers

pub mod client;

pub use client::{ChainClient, SubtensorClient};
