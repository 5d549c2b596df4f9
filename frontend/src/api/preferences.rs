use super::{
    client::ApiClient,
    transport::ApiRequest,
    types::{
        ApiError, CreatePreference, DrawerPreference, IdRequest, Preference, UpdatePreference,
    },
};

impl ApiClient {
    pub async fn list_preferences(
        &self,
        page: u32,
        limit: usize,
    ) -> Result<Vec<Preference>, ApiError> {
        let request = ApiRequest::post(self.endpoints().preferences_list.clone())
            .query("page", page)
            .query("limit", limit)
            .json(&self.identity())?;
        self.send_json(request).await
    }

    pub async fn create_preference(&self, payload: CreatePreference) -> Result<Preference, ApiError> {
        let request =
            ApiRequest::post(self.endpoints().preferences_create.clone()).json(&payload)?;
        self.send_json(request).await
    }

    pub async fn update_preference(&self, payload: UpdatePreference) -> Result<(), ApiError> {
        let request =
            ApiRequest::post(self.endpoints().preferences_update.clone()).json(&payload)?;
        self.send_empty(request).await
    }

    pub async fn delete_preference(&self, id: &str) -> Result<(), ApiError> {
        let request = ApiRequest::post(self.endpoints().preferences_delete.clone())
            .json(&IdRequest { id: id.to_string() })?;
        self.send_empty(request).await
    }

    pub async fn save_drawer_pinned(&self, pinned: bool) -> Result<(), ApiError> {
        let payload = DrawerPreference {
            user_id: self.session().user_id(),
            drawer_pinned: pinned,
        };
        let request =
            ApiRequest::post(self.endpoints().preferences_drawer.clone()).json(&payload)?;
        self.send_empty(request).await
    }
}
