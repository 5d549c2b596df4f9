use super::{
    client::ApiClient,
    transport::{ApiRequest, FormField},
    types::{ApiError, BlobData, Document, IdRequest, UpdateDocument, UploadDocument},
};

impl ApiClient {
    pub async fn list_documents(&self, page: u32, limit: usize) -> Result<Vec<Document>, ApiError> {
        let request = ApiRequest::post(self.endpoints().documents_list.clone())
            .query("page", page)
            .query("limit", limit)
            .json(&self.identity())?;
        self.send_json(request).await
    }

    pub async fn upload_document(&self, upload: UploadDocument) -> Result<Document, ApiError> {
        if upload.bytes.is_empty() {
            return Err(ApiError::validation("The selected file is empty"));
        }
        let identity = self.identity();
        let fields = vec![
            FormField::File {
                name: "file".into(),
                file_name: upload.file_name,
                content_type: upload.content_type,
                bytes: upload.bytes,
            },
            FormField::Text {
                name: "description".into(),
                value: upload.description,
            },
            FormField::Text {
                name: "labels".into(),
                value: serde_json::to_string(&upload.labels)
                    .map_err(|e| ApiError::unknown(e.to_string()))?,
            },
            FormField::Text {
                name: "userId".into(),
                value: identity.user_id,
            },
        ];
        let request = ApiRequest::post(self.endpoints().documents_upload.clone()).multipart(fields);
        self.send_json(request).await
    }

    pub async fn update_document(&self, update: UpdateDocument) -> Result<(), ApiError> {
        let request = ApiRequest::post(self.endpoints().documents_update.clone()).json(&update)?;
        self.send_empty(request).await
    }

    pub async fn delete_document(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::post(self.endpoints().documents_delete.clone())
            .json(&IdRequest { id: id.to_string() })?;
        self.send_empty(request).await
    }

    pub async fn fetch_document_content(&self, id: &str) -> Result<BlobData, ApiError> {
        let request = ApiRequest::post(self.endpoints().documents_content.clone())
            .json(&IdRequest { id: id.to_string() })?;
        self.send_blob(request).await
    }

    pub async fn fetch_document_thumbnail(&self, id: &str) -> Result<BlobData, ApiError> {
        let request = ApiRequest::post(self.endpoints().documents_thumbnail.clone())
            .json(&IdRequest { id: id.to_string() })?;
        self.send_blob(request).await
    }
}
