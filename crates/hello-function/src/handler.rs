//! The hello world function

use hello_function_sdk::{Request, Response};

/// Body returned for `GET`.
pub const GREETING: &str = "Hello World!";

/// Body returned for every other method.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Answers `GET` with a greeting and any other method with 405.
///
/// The method match is exact and case-sensitive. Path and remote address are
/// logged but never influence the response.
pub fn handle(req: &Request) -> Response {
    tracing::info!("Request method: {}", req.method);
    tracing::info!("Request path: {}", req.path);
    tracing::info!("Remote address: {}", req.remote_addr);

    if req.method == "GET" {
        GREETING.into()
    } else {
        (METHOD_NOT_ALLOWED, 405).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn handle_capturing_logs(req: &Request) -> (Response, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let response = tracing::subscriber::with_default(subscriber, || handle(req));
        (response, buffer.contents())
    }

    #[test]
    fn test_get_returns_greeting() {
        let response = handle(&Request::new("GET", "/", "127.0.0.1"));
        assert_eq!(response.status, 200);
        assert_eq!(response.body_text(), "Hello World!");
    }

    #[test]
    fn test_post_is_not_allowed() {
        let response = handle(&Request::new("POST", "/", "10.0.0.5"));
        assert_eq!(response.status, 405);
        assert_eq!(response.body_text(), "Method not allowed");
    }

    #[test]
    fn test_method_match_is_case_sensitive() {
        let response = handle(&Request::new("get", "/", "127.0.0.1"));
        assert_eq!(response.status, 405);
        assert_eq!(response.body_text(), "Method not allowed");
    }

    #[test]
    fn test_every_other_method_is_rejected() {
        for method in ["HEAD", "PUT", "DELETE", "OPTIONS", "PATCH", "TRACE", "BREW", "", " GET"] {
            let response = handle(&Request::new(method, "/", "127.0.0.1"));
            assert_eq!(response.status, 405, "method {:?}", method);
            assert_eq!(response.body_text(), METHOD_NOT_ALLOWED);
        }
    }

    #[test]
    fn test_path_and_remote_addr_do_not_affect_response() {
        let baseline = handle(&Request::new("GET", "/", "127.0.0.1"));
        for (path, remote) in [("/deep/nested/path", "10.0.0.5"), ("", ""), ("/?x=1", "::1")] {
            assert_eq!(handle(&Request::new("GET", path, remote)), baseline);
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let req = Request::new("DELETE", "/items/1", "192.168.1.20");
        assert_eq!(handle(&req), handle(&req));
    }

    #[test]
    fn test_logs_method_path_and_remote_address() {
        let (response, logs) = handle_capturing_logs(&Request::new("POST", "/submit", "10.0.0.5"));
        assert_eq!(response.status, 405);

        let lines: Vec<&str> = logs.lines().collect();
        assert_eq!(lines.len(), 3, "logs: {}", logs);
        assert!(lines.iter().all(|line| line.contains("INFO")));
        assert!(lines[0].contains("Request method: POST"));
        assert!(lines[1].contains("Request path: /submit"));
        assert!(lines[2].contains("Remote address: 10.0.0.5"));
    }
}
