pub mod http_client_factory;
pub mod influx;
pub mod observability;
pub mod tankerkoenig;

pub use http_client_factory::HttpClientFactory;
