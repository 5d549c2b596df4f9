use crate::{
    api::{ApiClient, ApiError, BlobData, Document, UpdateDocument, UploadDocument},
    state::list::PageSource,
};
use async_trait::async_trait;
use std::rc::Rc;

#[derive(Clone)]
pub struct DocumentsRepository {
    client: Rc<ApiClient>,
}

impl DocumentsRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn upload(&self, upload: UploadDocument) -> Result<Document, ApiError> {
        self.client.upload_document(upload).await
    }

    pub async fn update(&self, update: UpdateDocument) -> Result<(), ApiError> {
        self.client.update_document(update).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_document(id).await
    }

    pub async fn content(&self, id: &str) -> Result<BlobData, ApiError> {
        self.client.fetch_document_content(id).await
    }

    pub async fn thumbnail(&self, id: &str) -> Result<BlobData, ApiError> {
        self.client.fetch_document_thumbnail(id).await
    }
}

#[async_trait(?Send)]
impl PageSource<Document> for DocumentsRepository {
    async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<Document>, ApiError> {
        self.client.list_documents(page, limit).await
    }
}
