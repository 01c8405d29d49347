//! `/import` endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::ImportReport;
use crate::traits::MultipartFile;

/// Form field the backend reads the upload from.
pub const UPLOAD_FIELD: &str = "file";

pub struct ImportApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ImportApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload a CSV of hosts. Rows whose IP exists update that host.
    pub async fn hosts_csv(
        &self,
        file_name: &str,
        contents: impl Into<bytes::Bytes>,
    ) -> Result<ImportReport, ApiError> {
        let file = MultipartFile::new(UPLOAD_FIELD, file_name, "text/csv", contents);
        self.client
            .post_multipart("/import/csv/hosts", file)
            .await?
            .into_data()
    }
}
