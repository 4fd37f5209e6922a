use crate::core::filter::RecordFilter;
use crate::domain::model::{OutputFormat, Record};
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
    fn input_files(&self) -> &[String];
    fn find_key(&self) -> Option<&str>;
    fn filter(&self) -> RecordFilter;
    fn output_format(&self) -> OutputFormat;
    fn output_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load(&self) -> Result<Vec<Record>>;
}

#[async_trait]
impl RecordSource for Vec<Record> {
    async fn load(&self) -> Result<Vec<Record>> {
        Ok(self.clone())
    }
}
