// Snapshot sinks
pub mod publishers;

// Periodic fetch-and-publish loop
pub mod scheduler;

// Shutdown signalling
pub mod shutdown;

// Composition roots
pub mod system;
