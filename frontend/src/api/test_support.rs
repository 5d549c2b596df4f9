#[cfg(test)]
pub mod mock {
    use crate::api::transport::{ApiRequest, HttpResponse, Method, Transport, TransportError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    pub const GET: Method = Method::Get;
    pub const POST: Method = Method::Post;

    pub const BASE_URL: &str = "http://mock.local/api";

    /// Scripted transport. Routes are matched in registration order; a route
    /// limited with `times` stops matching once used up.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        inner: Rc<RefCell<Inner>>,
    }

    #[derive(Default)]
    struct Inner {
        routes: Vec<Route>,
        calls: Vec<RecordedCall>,
    }

    struct Route {
        method: Method,
        path: String,
        remaining: Option<usize>,
        response: Result<HttpResponse, TransportError>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub method: Method,
        pub path: String,
        pub bearer: Option<String>,
        pub request: ApiRequest,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.expect("mock requires method");
            let path = when.path.expect("mock requires path");
            let response = match then.network_error {
                Some(message) => Err(TransportError::Network(message)),
                None => Ok(HttpResponse {
                    status: then.status.unwrap_or(200),
                    content_type: then
                        .content_type
                        .or_else(|| Some("application/json".to_string())),
                    body: then.body.unwrap_or_else(|| b"{}".to_vec()),
                }),
            };
            self.inner.borrow_mut().routes.push(Route {
                method,
                path,
                remaining: when.times,
                response,
            });
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.inner.borrow().calls.clone()
        }

        pub fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
            self.calls()
                .into_iter()
                .filter(|call| call.path == path)
                .collect()
        }

        pub fn hits(&self, path: &str) -> usize {
            self.calls_to(path).len()
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(
            &self,
            url: &str,
            request: &ApiRequest,
            bearer: Option<&str>,
        ) -> Result<HttpResponse, TransportError> {
            let path = url
                .strip_prefix(BASE_URL)
                .unwrap_or(url)
                .to_string();
            self.inner.borrow_mut().calls.push(RecordedCall {
                method: request.method,
                path: path.clone(),
                bearer: bearer.map(str::to_string),
                request: request.clone(),
            });

            // Let other futures run, as a real network round trip would.
            yield_now().await;

            let mut inner = self.inner.borrow_mut();
            let route = inner.routes.iter_mut().find(|route| {
                route.method == request.method
                    && route.path == path
                    && route.remaining != Some(0)
            });
            match route {
                Some(route) => {
                    if let Some(left) = route.remaining.as_mut() {
                        *left -= 1;
                    }
                    route.response.clone()
                }
                None => Err(TransportError::Network(format!(
                    "No mock for {} {}",
                    request.method.as_str(),
                    path
                ))),
            }
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
        times: Option<usize>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }

        pub fn times(&mut self, times: usize) -> &mut Self {
            self.times = Some(times);
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Vec<u8>>,
        content_type: Option<String>,
        network_error: Option<String>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(serde_json::to_vec(&body).expect("serialize mock body"));
            self
        }

        pub fn bytes_body(&mut self, content_type: &str, body: &[u8]) -> &mut Self {
            self.content_type = Some(content_type.to_string());
            self.body = Some(body.to_vec());
            self
        }

        pub fn network_error(&mut self, message: &str) -> &mut Self {
            self.network_error = Some(message.to_string());
            self
        }
    }

    pub use super::yield_now;
}

#[cfg(test)]
pub use futures_yield::yield_now;

#[cfg(test)]
mod futures_yield {
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Returns `Pending` exactly once, waking itself, like a network await.
    pub fn yield_now() -> YieldNow {
        YieldNow { yielded: false }
    }

    pub struct YieldNow {
        yielded: bool,
    }

    impl Future for YieldNow {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.yielded {
                Poll::Ready(())
            } else {
                self.yielded = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }
}
