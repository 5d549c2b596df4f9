use crate::api::ApiError;
use leptos::*;

fn detail_lines(error: &ApiError) -> Vec<String> {
    error
        .details
        .as_ref()
        .and_then(|d| d.get("errors"))
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Error panel for form submissions. Field errors from a rejected payload are
/// listed under the message.
#[component]
pub fn InlineErrorMessage(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.with(Option::is_some) fallback=|| ()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded space-y-1 my-2" role="alert">
                <div class="font-bold">{move || error.get().map(|e| e.error).unwrap_or_default()}</div>
                {move || {
                    let lines = error.with(|e| e.as_ref().map(detail_lines).unwrap_or_default());
                    (!lines.is_empty()).then(|| view! {
                        <ul class="list-disc list-inside text-sm">
                            {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                        </ul>
                    })
                }}
                {move || error.get().and_then(|e| e.status).map(|status| view! {
                    <div class="text-xs opacity-75">{format!("HTTP {}", status)}</div>
                })}
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;
    use serde_json::json;

    #[test]
    fn renders_field_errors() {
        let html = render_to_string(move || {
            let body = serde_json::to_vec(&json!({
                "message": "Validation failed",
                "details": { "errors": ["Email is required", "Email is invalid"] }
            }))
            .unwrap();
            let signal = create_rw_signal(Some(ApiError::from_status(422, &body)));
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(html.contains("Validation failed"));
        assert!(html.contains("Email is required"));
        assert!(html.contains("HTTP 422"));
    }

    #[test]
    fn local_errors_have_no_status_line() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(Some(ApiError::validation("Username is required")));
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(html.contains("Username is required"));
        assert!(!html.contains("HTTP"));
    }

    #[test]
    fn nothing_renders_without_an_error() {
        let html = render_to_string(move || {
            let signal = create_rw_signal(None::<ApiError>);
            view! { <InlineErrorMessage error=signal /> }
        });
        assert!(!html.contains("role=\"alert\""));
    }
}
