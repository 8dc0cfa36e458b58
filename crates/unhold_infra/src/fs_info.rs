use std::path::Path;

use unhold_app::FileInfoInfra;

/// Metadata checks against the real filesystem.
#[derive(Default)]
pub struct UnholdFileMetaService;

impl UnholdFileMetaService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl FileInfoInfra for UnholdFileMetaService {
    async fn is_file(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}
