//! STRM file generation.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::types::Strm115TreeParams;
use super::FusionClient;
use crate::error::Result;

impl FusionClient {
    /// Generate STRM files from an exported 115 directory tree.
    ///
    /// Uploads the tree as multipart form data; the backend walks it,
    /// applies the filter rules, and writes STRM entries under
    /// `save_local_path`. Consumes `params` because the tree contents move
    /// into the request body.
    pub async fn generate_115_directory_tree(&self, params: Strm115TreeParams) -> Result<()> {
        let filter_rules = serde_json::to_string(&params.filter_rules)?;
        // The upload field is named `world` on the wire.
        let mut form = Form::new()
            .part(
                "world",
                Part::bytes(params.tree_contents).file_name(params.tree_file_name),
            )
            .text("cloud_storage_id", params.cloud_storage_id.to_string())
            .text("save_local_path", params.save_local_path)
            .text("filter_rules", filter_rules);
        if let Some(prefix) = params.content_prefix {
            form = form.text("content_prefix", prefix);
        }
        self.send_multipart_unit(Method::POST, "/api/strm/gen/115-directory-tree", form)
            .await
    }
}
