pub mod sea_query_backend;

pub use sea_query_backend::{SeaQueryBackend, SeaQueryPlan};
