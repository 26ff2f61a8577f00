pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{Order, OrderStatus};
pub use ports::OrderRepository;
pub use services::OrderService;
