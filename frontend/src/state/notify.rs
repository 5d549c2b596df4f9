use leptos::*;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
}

/// Success/error notifications shown by the toast stack.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    toasts: RwSignal<Vec<Toast>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            toasts: create_rw_signal(Vec::new()),
        }
    }

    pub fn toasts(&self) -> RwSignal<Vec<Toast>> {
        self.toasts
    }

    pub fn success(&self, message: impl Into<String>) -> Uuid {
        self.push(ToastKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> Uuid {
        let message = message.into();
        log::warn!("{}", message);
        self.push(ToastKind::Error, message)
    }

    pub fn dismiss(&self, id: Uuid) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.update(|toasts| toasts.push(Toast { id, kind, message }));
        id
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifier() -> Notifier {
    let notifier = Notifier::new();
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().unwrap_or_else(provide_notifier)
}
