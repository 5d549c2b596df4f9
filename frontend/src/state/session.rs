use crate::api::{LoginResponse, UserType};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub token: String,
    pub user_name: String,
    pub user_type: UserType,
    pub user_id: String,
    pub drawer_pinned: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

type Listener = Rc<dyn Fn(&SessionSnapshot)>;

#[derive(Default)]
struct SessionInner {
    data: RefCell<SessionSnapshot>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
}

/// Handle to the in-memory session shared by the request pipeline, the
/// route guard and the views. Clones share state. Nothing is persisted.
#[derive(Clone, Default)]
pub struct Session {
    inner: Rc<SessionInner>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.data.borrow().clone()
    }

    pub fn token(&self) -> String {
        self.inner.data.borrow().token.clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.mutate(|data| data.token = token);
    }

    pub fn user_name(&self) -> String {
        self.inner.data.borrow().user_name.clone()
    }

    pub fn set_user_name(&self, user_name: impl Into<String>) {
        let user_name = user_name.into();
        self.mutate(|data| data.user_name = user_name);
    }

    pub fn user_type(&self) -> UserType {
        self.inner.data.borrow().user_type
    }

    pub fn set_user_type(&self, user_type: UserType) {
        self.mutate(|data| data.user_type = user_type);
    }

    pub fn user_id(&self) -> String {
        self.inner.data.borrow().user_id.clone()
    }

    pub fn set_user_id(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        self.mutate(|data| data.user_id = user_id);
    }

    pub fn drawer_pinned(&self) -> bool {
        self.inner.data.borrow().drawer_pinned
    }

    pub fn set_drawer_pinned(&self, pinned: bool) {
        self.mutate(|data| data.drawer_pinned = pinned);
    }

    pub fn is_authenticated(&self) -> bool {
        !self.inner.data.borrow().token.is_empty()
    }

    /// Replaces the whole session from a login response.
    pub fn establish(&self, login: &LoginResponse) {
        log::info!("session established for {}", login.user_name);
        self.mutate(|data| {
            *data = SessionSnapshot {
                token: login.token.clone(),
                user_name: login.user_name.clone(),
                user_type: login.user_type,
                user_id: login.user_id.clone(),
                drawer_pinned: login.drawer_pinned,
            }
        });
    }

    pub fn clear(&self) {
        if self.inner.data.borrow().is_authenticated() {
            log::info!("session cleared");
        }
        self.mutate(|data| *data = SessionSnapshot::default());
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionSnapshot) + 'static) -> ListenerId {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        ListenerId(id)
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id.0);
    }

    fn mutate(&self, f: impl FnOnce(&mut SessionSnapshot)) {
        let snapshot = {
            let mut data = self.inner.data.borrow_mut();
            let before = data.clone();
            f(&mut data);
            if *data == before {
                return;
            }
            data.clone()
        };
        // Listeners may read or write the session, so no borrow is held here.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> LoginResponse {
        LoginResponse {
            token: "a.b.c".into(),
            user_name: "alice".into(),
            user_type: UserType::Admin,
            user_id: "u1".into(),
            drawer_pinned: true,
        }
    }

    #[test]
    fn accessors_default_to_empty() {
        let session = Session::new();
        assert_eq!(session.token(), "");
        assert_eq!(session.user_name(), "");
        assert_eq!(session.user_type(), UserType::Standard);
        assert!(!session.drawer_pinned());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn clones_share_state() {
        let session = Session::new();
        let other = session.clone();
        other.set_token("t1");
        other.set_user_id("u9");
        assert_eq!(session.token(), "t1");
        assert_eq!(session.user_id(), "u9");
    }

    #[test]
    fn establish_and_clear_round_the_session() {
        let session = Session::new();
        session.establish(&login());
        let snap = session.snapshot();
        assert_eq!(snap.user_name, "alice");
        assert_eq!(snap.user_type, UserType::Admin);
        assert!(snap.drawer_pinned);

        session.clear();
        assert_eq!(session.snapshot(), SessionSnapshot::default());
    }

    #[test]
    fn listeners_see_changes_until_unsubscribed() {
        let session = Session::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = session.subscribe(move |snap| sink.borrow_mut().push(snap.token.clone()));

        session.set_token("t1");
        session.set_token("t1");
        session.set_drawer_pinned(true);
        session.unsubscribe(id);
        session.set_token("t2");

        assert_eq!(*seen.borrow(), vec!["t1".to_string(), "t1".to_string()]);
    }

    #[test]
    fn listener_may_write_back_into_session() {
        let session = Session::new();
        let handle = session.clone();
        session.subscribe(move |snap| {
            if snap.token.is_empty() {
                handle.set_user_name("");
            }
        });
        session.establish(&login());
        session.clear();
        assert_eq!(session.user_name(), "");
    }
}
