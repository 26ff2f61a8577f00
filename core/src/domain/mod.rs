pub mod common;
pub mod filter;
pub mod order;
pub mod user;
