use crate::domain::model::{BatchResult, Calculation, ErrorPolicy, OverflowMode};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn overflow_mode(&self) -> OverflowMode;
    fn error_policy(&self) -> ErrorPolicy;
    fn max_records(&self) -> Option<usize>;
    /// 壓縮檔名稱；回傳 `None` 表示不壓縮
    fn archive_name(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Calculation>>;
    async fn transform(&self, data: Vec<Calculation>) -> Result<BatchResult>;
    async fn load(&self, result: BatchResult) -> Result<String>;
}
