/// One-shot timer source. Dropping the returned handle cancels the timer.
pub trait Timer {
    type Handle: 'static;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

impl Timer for GlooTimer {
    type Handle = gloo_timers::callback::Timeout;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Handle {
        gloo_timers::callback::Timeout::new(delay_ms, callback)
    }
}

/// Converts whole seconds to a timer delay, clamped to what `setTimeout`
/// accepts.
pub fn delay_ms_for(seconds: i64) -> u32 {
    const MAX_DELAY_MS: i64 = i32::MAX as i64;
    seconds.saturating_mul(1000).clamp(0, MAX_DELAY_MS) as u32
}
