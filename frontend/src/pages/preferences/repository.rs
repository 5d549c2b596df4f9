use crate::{
    api::{ApiClient, ApiError, CreatePreference, Preference, UpdatePreference},
    state::list::PageSource,
};
use async_trait::async_trait;
use std::rc::Rc;

#[derive(Clone)]
pub struct PreferencesRepository {
    client: Rc<ApiClient>,
}

impl PreferencesRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// New preferences always belong to the signed-in user.
    pub async fn create(&self, key: String, value: String) -> Result<Preference, ApiError> {
        let payload = CreatePreference {
            user_id: self.client.session().user_id(),
            key,
            value,
        };
        self.client.create_preference(payload).await
    }

    pub async fn update(&self, payload: UpdatePreference) -> Result<(), ApiError> {
        self.client.update_preference(payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_preference(id).await
    }
}

#[async_trait(?Send)]
impl PageSource<Preference> for PreferencesRepository {
    async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<Preference>, ApiError> {
        self.client.list_preferences(page, limit).await
    }
}
