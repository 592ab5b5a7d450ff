// Station snapshot model
pub mod station;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
