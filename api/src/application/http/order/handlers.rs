pub mod get_orders;
