// Adapters layer: concrete implementations for external systems.
// Local storage lives with the CLI config under src/config.

pub mod http;
