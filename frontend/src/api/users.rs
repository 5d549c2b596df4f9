use super::{
    client::ApiClient,
    transport::ApiRequest,
    types::{ApiError, CreateUser, IdRequest, UpdateUser, User},
};

impl ApiClient {
    pub async fn list_users(&self, page: u32, limit: usize) -> Result<Vec<User>, ApiError> {
        let request = ApiRequest::post(self.endpoints().users_list.clone())
            .query("page", page)
            .query("limit", limit)
            .json(&self.identity())?;
        self.send_json(request).await
    }

    pub async fn create_user(&self, payload: CreateUser) -> Result<User, ApiError> {
        let request = ApiRequest::post(self.endpoints().users_create.clone()).json(&payload)?;
        self.send_json(request).await
    }

    pub async fn update_user(&self, payload: UpdateUser) -> Result<(), ApiError> {
        let request = ApiRequest::post(self.endpoints().users_update.clone()).json(&payload)?;
        self.send_empty(request).await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::post(self.endpoints().users_delete.clone())
            .json(&IdRequest { id: id.to_string() })?;
        self.send_empty(request).await
    }
}
