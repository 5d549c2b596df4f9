use super::{
    client::ApiClient,
    transport::ApiRequest,
    types::{ApiError, BlobData},
};

impl ApiClient {
    pub async fn fetch_cv(&self) -> Result<BlobData, ApiError> {
        let request = ApiRequest::get(self.endpoints().portfolio_cv.clone());
        self.send_blob(request).await
    }
}
