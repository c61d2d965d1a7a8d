use crate::domain::model::{HouseRecord, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path`, replacing whatever was there.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Moves `from` to `to`, replacing `to` if it exists.
    fn rename(&self, from: &str, to: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
    fn concurrent_requests(&self) -> usize;
    fn fail_on_mismatch(&self) -> bool;
    fn output_path(&self) -> &str;
    fn file_stem(&self) -> &str;
    fn output_formats(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<HouseRecord>>;
    async fn transform(&self, data: Vec<HouseRecord>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
