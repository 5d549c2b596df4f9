use super::repository::PreferencesRepository;
use crate::{
    api::{ApiClient, ApiError, Preference, UpdatePreference},
    state::{
        auth::use_api_client,
        list::ListController,
        notify::{use_notifier, Notifier},
    },
    utils::{lifetime::Lifetime, search::SearchQuery},
};
use leptos::*;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceDraft {
    pub key: String,
    pub value: String,
}

#[derive(Clone)]
pub struct PreferencesViewModel {
    pub repository: PreferencesRepository,
    pub list: ListController<Preference>,
    pub notifier: Notifier,
    pub query: RwSignal<SearchQuery>,
    pub visible: Memo<Vec<Preference>>,
    pub draft: RwSignal<PreferenceDraft>,
    pub form_error: RwSignal<Option<ApiError>>,
    /// Preference id mapped to the value being edited.
    pub editing: RwSignal<Option<(String, String)>>,
}

impl PreferencesViewModel {
    pub fn new(api: ApiClient, notifier: Notifier, lifetime: Lifetime) -> Self {
        let repository = PreferencesRepository::new_with_client(Rc::new(api));
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
            draft: create_rw_signal(PreferenceDraft::default()),
            form_error: create_rw_signal(None),
            editing: create_rw_signal(None),
        }
    }

    pub async fn load_more(&self) {
        self.list.load_or_notify(false, &self.notifier).await;
    }

    pub async fn create(&self, draft: PreferenceDraft) -> bool {
        let key = draft.key.trim().to_string();
        if key.is_empty() {
            self.form_error
                .set(Some(ApiError::validation("Preference key is required")));
            return false;
        }
        self.form_error.set(None);
        let result = self.repository.create(key, draft.value).await;
        let ok = self
            .list
            .finish_mutation(result, &self.notifier, "Preference saved")
            .await;
        if ok {
            self.draft.set(PreferenceDraft::default());
        }
        ok
    }

    pub async fn update(&self, id: String, value: String) -> bool {
        let result = self.repository.update(UpdatePreference { id, value }).await;
        let ok = self
            .list
            .finish_mutation(result, &self.notifier, "Preference updated")
            .await;
        if ok {
            self.editing.set(None);
        }
        ok
    }

    pub async fn delete(&self, id: &str) -> bool {
        let result = self.repository.delete(id).await;
        self.list
            .finish_mutation(result, &self.notifier, "Preference deleted")
            .await
    }
}

pub fn use_preferences_view_model() -> PreferencesViewModel {
    let vm = PreferencesViewModel::new(use_api_client(), use_notifier(), Lifetime::bound_to_owner());
    let initial = vm.clone();
    create_effect(move |_| {
        let vm = initial.clone();
        spawn_local(async move { vm.load_more().await });
    });
    vm
}
