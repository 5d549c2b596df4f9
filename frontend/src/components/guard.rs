use crate::{
    api::token,
    components::layout::LoadingSpinner,
    state::{auth::use_auth, session::Session},
    utils::{
        browser,
        timer::{delay_ms_for, GlooTimer, Timer},
    },
};
use leptos::*;
use std::{cell::RefCell, rc::Rc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    MissingToken,
    Unreadable,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Valid { expires_in_secs: i64 },
    Invalid(InvalidReason),
}

impl GuardDecision {
    pub fn is_valid(&self) -> bool {
        matches!(self, GuardDecision::Valid { .. })
    }
}

pub fn evaluate(token: &str, now: i64) -> GuardDecision {
    if token.is_empty() {
        return GuardDecision::Invalid(InvalidReason::MissingToken);
    }
    match token::seconds_until_expiry_at(token, now) {
        None => GuardDecision::Invalid(InvalidReason::Unreadable),
        Some(secs) if secs <= 0 => GuardDecision::Invalid(InvalidReason::Expired),
        Some(secs) => GuardDecision::Valid {
            expires_in_secs: secs,
        },
    }
}

/// One-shot expiry timer keyed on the token it was armed for.
pub struct ExpiryWatch<T: Timer> {
    timer: T,
    armed: RefCell<Option<(String, T::Handle)>>,
}

impl<T: Timer> ExpiryWatch<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            armed: RefCell::new(None),
        }
    }

    /// Arms the timer for `token`. A timer already armed for the same token
    /// is kept; one armed for a different token is cancelled first.
    pub fn arm(&self, token: &str, expires_in_secs: i64, on_expire: impl FnOnce() + 'static) {
        let mut armed = self.armed.borrow_mut();
        if matches!(armed.as_ref(), Some((current, _)) if current == token) {
            return;
        }
        armed.take();
        let delay = delay_ms_for(expires_in_secs);
        log::debug!("session expiry timer armed for {} ms", delay);
        let handle = self.timer.schedule(delay, Box::new(on_expire));
        *armed = Some((token.to_string(), handle));
    }

    /// Arms for `token` and evaluates it again with `clock` when the timer
    /// fires. Delays are capped, so a token that is still valid at that point
    /// re-arms for the rest of its lifetime instead of expiring.
    pub fn watch<C, F>(self: &Rc<Self>, token: &str, expires_in_secs: i64, clock: C, on_expire: F)
    where
        T: 'static,
        C: Fn() -> i64 + 'static,
        F: FnOnce() + 'static,
    {
        let this = Rc::downgrade(self);
        let armed_token = token.to_string();
        self.arm(token, expires_in_secs, move || {
            let Some(this) = this.upgrade() else {
                return;
            };
            match evaluate(&armed_token, clock()) {
                GuardDecision::Valid { expires_in_secs } => {
                    log::debug!("expiry timer fired early, {} s left", expires_in_secs);
                    this.clear();
                    this.watch(&armed_token, expires_in_secs, clock, on_expire);
                }
                GuardDecision::Invalid(_) => on_expire(),
            }
        });
    }

    pub fn clear(&self) {
        self.armed.borrow_mut().take();
    }

    pub fn is_armed(&self) -> bool {
        self.armed.borrow().is_some()
    }
}

fn expire(session: &Session) {
    log::info!("session expired, signing out");
    session.clear();
    browser::redirect_to_login();
}

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let snapshot = auth.snapshot;
    let decision = create_memo(move |_| {
        snapshot.with(|s| evaluate(&s.token, chrono::Utc::now().timestamp()))
    });

    let watch = Rc::new(ExpiryWatch::new(GlooTimer));
    let effect_watch = Rc::clone(&watch);
    let session = auth.session.clone();
    create_effect(move |_| match decision.get() {
        GuardDecision::Invalid(reason) => {
            effect_watch.clear();
            log::debug!("protected route blocked: {:?}", reason);
            browser::redirect_to_login();
        }
        GuardDecision::Valid { expires_in_secs } => {
            let token = snapshot.with_untracked(|s| s.token.clone());
            let session = session.clone();
            effect_watch.watch(
                &token,
                expires_in_secs,
                || chrono::Utc::now().timestamp(),
                move || expire(&session),
            );
        }
    });
    on_cleanup(move || watch.clear());

    view! {
        <Show
            when=move || decision.get().is_valid()
            fallback=|| view! { <LoadingSpinner /> }
        >
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let snapshot = use_auth().snapshot;
    let is_admin = create_memo(move |_| snapshot.with(|s| s.user_type.is_admin()));
    create_effect(move |_| {
        let signed_in = snapshot.with(|s| s.is_authenticated());
        if signed_in && !is_admin.get() {
            browser::navigate_to(browser::HOME_PATH);
        }
    });
    let children = store_value(children);
    view! {
        <RequireAuth>
            <Show when=move || is_admin.get() fallback=|| ()>
                {children.with_value(|children| children())}
            </Show>
        </RequireAuth>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::token::token_with_exp;
    use crate::utils::timer::fake::FakeTimer;
    use std::cell::Cell;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn tokens_are_classified() {
        assert_eq!(
            evaluate("", NOW),
            GuardDecision::Invalid(InvalidReason::MissingToken)
        );
        assert_eq!(
            evaluate("not-a-token", NOW),
            GuardDecision::Invalid(InvalidReason::Unreadable)
        );
        assert_eq!(
            evaluate(&token_with_exp(NOW), NOW),
            GuardDecision::Invalid(InvalidReason::Expired)
        );
        assert_eq!(
            evaluate(&token_with_exp(NOW - 60), NOW),
            GuardDecision::Invalid(InvalidReason::Expired)
        );
        assert_eq!(
            evaluate(&token_with_exp(NOW + 90), NOW),
            GuardDecision::Valid {
                expires_in_secs: 90
            }
        );
    }

    #[test]
    fn timer_is_armed_for_the_remaining_time() {
        let timer = FakeTimer::default();
        let watch = ExpiryWatch::new(timer.clone());
        watch.arm("t1", 90, || {});
        assert_eq!(timer.pending(), vec![90_000]);
        assert!(watch.is_armed());
    }

    #[test]
    fn same_token_does_not_rearm() {
        let timer = FakeTimer::default();
        let watch = ExpiryWatch::new(timer.clone());
        watch.arm("t1", 90, || {});
        watch.arm("t1", 80, || {});
        assert_eq!(timer.scheduled_count(), 1);
        assert_eq!(timer.pending(), vec![90_000]);
    }

    #[test]
    fn new_token_replaces_the_previous_timer() {
        let timer = FakeTimer::default();
        let watch = ExpiryWatch::new(timer.clone());
        let fired = Rc::new(Cell::new(0));

        let first = Rc::clone(&fired);
        watch.arm("t1", 10, move || first.set(first.get() + 1));
        let second = Rc::clone(&fired);
        watch.arm("t2", 3600, move || second.set(second.get() + 10));
        assert_eq!(timer.pending(), vec![3_600_000]);

        timer.fire_all();
        assert_eq!(fired.get(), 10);
    }

    #[test]
    fn clear_cancels_the_timer() {
        let timer = FakeTimer::default();
        let watch = ExpiryWatch::new(timer.clone());
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        watch.arm("t1", 5, move || flag.set(true));
        watch.clear();

        timer.fire_all();
        assert!(!fired.get());
        assert!(timer.pending().is_empty());
        assert!(!watch.is_armed());
    }

    #[test]
    fn long_lived_token_survives_the_capped_delay() {
        let timer = FakeTimer::default();
        let watch = Rc::new(ExpiryWatch::new(timer.clone()));
        let clock = Rc::new(Cell::new(NOW));
        let expired = Rc::new(Cell::new(false));
        let thirty_days = 30 * 86_400;
        let token = token_with_exp(NOW + thirty_days);

        let now = Rc::clone(&clock);
        let flag = Rc::clone(&expired);
        watch.watch(&token, thirty_days, move || now.get(), move || flag.set(true));
        assert_eq!(timer.pending(), vec![i32::MAX as u32]);

        let capped_secs = i64::from(i32::MAX) / 1000;
        clock.set(NOW + capped_secs);
        timer.fire_all();
        assert!(!expired.get());
        assert!(watch.is_armed());
        assert_eq!(
            timer.pending(),
            vec![((thirty_days - capped_secs) * 1000) as u32]
        );

        clock.set(NOW + thirty_days);
        timer.fire_all();
        assert!(expired.get());
        assert!(timer.pending().is_empty());
    }

    #[test]
    fn watched_token_expires_when_the_timer_fires_on_time() {
        let timer = FakeTimer::default();
        let watch = Rc::new(ExpiryWatch::new(timer.clone()));
        let expired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&expired);
        watch.watch(&token_with_exp(NOW + 60), 60, || NOW + 60, move || flag.set(true));
        timer.fire_all();
        assert!(expired.get());
        assert_eq!(timer.scheduled_count(), 1);
    }

    #[test]
    fn expiry_callback_can_clear_the_session() {
        let timer = FakeTimer::default();
        let watch = ExpiryWatch::new(timer.clone());
        let session = Session::new();
        session.set_token(token_with_exp(NOW + 5));

        let handle = session.clone();
        watch.arm(&session.token(), 5, move || handle.clear());
        timer.fire_all();
        assert!(!session.is_authenticated());
    }
}
