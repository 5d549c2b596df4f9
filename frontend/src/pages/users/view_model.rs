use super::{
    repository::UsersRepository,
    utils::{CreateUserForm, EditUserForm},
};
use crate::{
    api::{ApiClient, ApiError, User},
    state::{
        auth::use_api_client,
        list::ListController,
        notify::{use_notifier, Notifier},
    },
    utils::{lifetime::Lifetime, search::SearchQuery},
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone)]
pub struct UsersViewModel {
    pub repository: UsersRepository,
    pub list: ListController<User>,
    pub notifier: Notifier,
    pub query: RwSignal<SearchQuery>,
    pub visible: Memo<Vec<User>>,
    pub create_form: RwSignal<CreateUserForm>,
    pub form_error: RwSignal<Option<ApiError>>,
    pub editing: RwSignal<Option<EditUserForm>>,
    pub pending_delete: RwSignal<Option<User>>,
}

impl UsersViewModel {
    pub fn new(api: ApiClient, notifier: Notifier, lifetime: Lifetime) -> Self {
        let repository = UsersRepository::new_with_client(Rc::new(api));
        let list = ListController::new(Rc::new(repository.clone()), lifetime);
        let query = create_rw_signal(SearchQuery::default());
        let visible = {
            let list = list.clone();
            create_memo(move |_| query.with(|q| list.search(q)))
        };
        Self {
            repository,
            list,
            notifier,
            query,
            visible,
            create_form: create_rw_signal(CreateUserForm::default()),
            form_error: create_rw_signal(None),
            editing: create_rw_signal(None),
            pending_delete: create_rw_signal(None),
        }
    }

    pub async fn load_more(&self) {
        self.list.load_or_notify(false, &self.notifier).await;
    }

    pub async fn create(&self, form: CreateUserForm) -> bool {
        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.form_error.set(Some(ApiError::validation(message)));
                return false;
            }
        };
        self.form_error.set(None);
        let user_name = payload.user_name.clone();
        let result = self.repository.create(payload).await;
        let ok = self
            .list
            .finish_mutation(result, &self.notifier, &format!("User {} created", user_name))
            .await;
        if ok {
            self.create_form.set(CreateUserForm::default());
        }
        ok
    }

    pub async fn update(&self, form: EditUserForm) -> bool {
        let payload = match form.to_payload() {
            Ok(payload) => payload,
            Err(message) => {
                self.notifier.error(message);
                return false;
            }
        };
        let result = self.repository.update(payload).await;
        let ok = self
            .list
            .finish_mutation(result, &self.notifier, "User updated")
            .await;
        if ok {
            self.editing.set(None);
        }
        ok
    }

    pub async fn delete(&self, id: &str) -> bool {
        let result = self.repository.delete(id).await;
        self.pending_delete.set(None);
        self.list
            .finish_mutation(result, &self.notifier, "User deleted")
            .await
    }
}

pub fn use_users_view_model() -> UsersViewModel {
    let vm = UsersViewModel::new(use_api_client(), use_notifier(), Lifetime::bound_to_owner());
    let initial = vm.clone();
    create_effect(move |_| {
        let vm = initial.clone();
        spawn_local(async move { vm.load_more().await });
    });
    vm
}
