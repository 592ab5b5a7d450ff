pub mod client;
pub mod line_protocol;

pub use client::InfluxClient;
pub use line_protocol::Point;
