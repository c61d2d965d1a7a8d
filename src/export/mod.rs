pub mod tabular;

pub use tabular::{render, OutputFormat};
