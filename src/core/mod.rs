pub mod etl;
pub mod pipeline;
pub mod scraper;

pub use crate::domain::model::{HouseRecord, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
