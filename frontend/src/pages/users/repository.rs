use crate::{
    api::{ApiClient, ApiError, CreateUser, UpdateUser, User},
    state::list::PageSource,
};
use async_trait::async_trait;
use std::rc::Rc;

#[derive(Clone)]
pub struct UsersRepository {
    client: Rc<ApiClient>,
}

impl UsersRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn create(&self, payload: CreateUser) -> Result<User, ApiError> {
        self.client.create_user(payload).await
    }

    pub async fn update(&self, payload: UpdateUser) -> Result<(), ApiError> {
        self.client.update_user(payload).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete_user(id).await
    }
}

#[async_trait(?Send)]
impl PageSource<User> for UsersRepository {
    async fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<User>, ApiError> {
        self.client.list_users(page, limit).await
    }
}
