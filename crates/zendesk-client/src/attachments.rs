use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::debug;
use zendesk_domain::{Attachment, Upload};

use crate::client::ZendeskClient;
use crate::error::ClientError;

impl ZendeskClient {
    /// Upload raw file bytes. The returned token is what later deletes the
    /// upload; the attachment carries the stored file's metadata.
    pub async fn upload_attachment(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Upload, ClientError> {
        let url = self.url("/uploads.json");
        debug!(%url, file_name, bytes = content.len(), "uploading attachment");
        let req = self
            .request(Method::POST, &url)
            .query(&[("filename", file_name)])
            .header(CONTENT_TYPE, "application/binary")
            .body(content);
        let resp = self.send(req, &url).await?;
        Self::unwrap_envelope(resp, &url, "upload").await
    }

    pub async fn get_attachment(&self, id: i64) -> Result<Attachment, ClientError> {
        self.get_entity(&format!("/attachments/{}.json", id), "attachment").await
    }

    pub async fn delete_upload(&self, token: &str) -> Result<(), ClientError> {
        self.delete_path(&format!("/uploads/{}.json", token)).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{body_bytes, header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use crate::client::test_client;

    #[tokio::test]
    async fn upload_posts_raw_bytes_with_filename() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/uploads.json"))
            .and(query_param("filename", "logo.png"))
            .and(header("content-type", "application/binary"))
            .and(body_bytes(b"PNGDATA".to_vec()))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "upload": {
                    "token": "6bk3gql82em5nmf",
                    "attachment": {
                        "id":           498483,
                        "file_name":    "logo.png",
                        "content_url":  "https://acme.zendesk.com/attachments/logo.png",
                        "content_type": "image/png",
                        "size":         7,
                        "inline":       false,
                        "thumbnails":   [],
                    },
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let upload = test_client(&server)
            .upload_attachment("logo.png", b"PNGDATA".to_vec())
            .await
            .unwrap();
        assert_eq!(upload.token, "6bk3gql82em5nmf");
        assert_eq!(upload.attachment.id, Some(498483));
        assert_eq!(upload.attachment.size, 7);
    }

    #[tokio::test]
    async fn delete_upload_by_token() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/uploads/6bk3gql82em5nmf.json"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server).delete_upload("6bk3gql82em5nmf").await.unwrap();
    }

    #[tokio::test]
    async fn get_attachment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/attachments/498483.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "attachment": {
                    "id": 498483, "file_name": "logo.png", "content_type": "image/png",
                    "content_url": "https://acme.zendesk.com/attachments/logo.png", "size": 7,
                    "thumbnails": [{ "id": 1, "file_name": "logo_thumb.png", "content_url": "u", "content_type": "image/png", "size": 1 }],
                }
            })))
            .mount(&server)
            .await;

        let attachment = test_client(&server).get_attachment(498483).await.unwrap();
        assert_eq!(attachment.thumbnails.len(), 1);
        assert_eq!(attachment.thumbnails[0].file_name, "logo_thumb.png");
    }
}
