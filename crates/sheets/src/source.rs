//! The sheet source abstraction.

use async_trait::async_trait;
use bookgx_core::records::SheetTable;

use crate::error::FetchError;

/// Anything that can produce a sheet table.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Short description for logs, such as the export URL or the API range.
    fn describe(&self) -> String;

    /// Fetches the current rows, header first.
    async fn fetch_rows(&self) -> Result<SheetTable, FetchError>;
}
