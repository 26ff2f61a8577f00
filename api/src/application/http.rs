pub mod order;
pub mod query_extractor;
pub mod server;
#[cfg(test)]
pub mod test;
pub mod user;
