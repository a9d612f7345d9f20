pub mod price_port;
pub mod trade_store_port;
pub mod config_port;
pub mod report_port;
