//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes: static bodies, redirects (302 with Location),
//! bare error statuses, a header echo, and routes that fail a set number of
//! times before answering. Unknown paths get 404.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with this body; `Content-Type` omitted when `None`.
    Body {
        content_type: Option<&'static str>,
        body: Vec<u8>,
    },
    Redirect(String),
    Status(u16),
    /// 200 `text/plain` listing the request headers as `name: value`, names lowercased.
    EchoHeaders,
    /// Answers `status` for the first `failures` requests, then serves `then`.
    Flaky {
        failures: usize,
        status: u16,
        hits: Arc<AtomicUsize>,
        then: Box<Route>,
    },
}

impl Route {
    pub fn html(body: &str) -> Self {
        Route::Body {
            content_type: Some("text/html; charset=utf-8"),
            body: body.as_bytes().to_vec(),
        }
    }

    /// A `Flaky` route plus the counter of requests it has seen.
    pub fn flaky(failures: usize, status: u16, then: Route) -> (Self, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let route = Route::Flaky {
            failures,
            status,
            hits: Arc::clone(&hits),
            then: Box::new(then),
        };
        (route, hits)
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");

    match routes.get(path) {
        Some(route) => respond(&mut stream, route, request),
        None => write_status(&mut stream, 404),
    }
}

fn respond(stream: &mut std::net::TcpStream, route: &Route, request: &str) {
    match route {
        Route::Body { content_type, body } => write_body(stream, *content_type, body),
        Route::Redirect(location) => {
            let head = format!(
                "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                location
            );
            let _ = stream.write_all(head.as_bytes());
        }
        Route::Status(code) => write_status(stream, *code),
        Route::EchoHeaders => {
            let echoed: String = request
                .lines()
                .skip(1)
                .take_while(|l| !l.trim().is_empty())
                .filter_map(|l| l.split_once(':'))
                .map(|(name, value)| format!("{}: {}\n", name.trim().to_lowercase(), value.trim()))
                .collect();
            write_body(stream, Some("text/plain"), echoed.as_bytes());
        }
        Route::Flaky {
            failures,
            status,
            hits,
            then,
        } => {
            if hits.fetch_add(1, Ordering::SeqCst) < *failures {
                write_status(stream, *status);
            } else {
                respond(stream, then, request);
            }
        }
    }
}

fn write_body(stream: &mut std::net::TcpStream, content_type: Option<&str>, body: &[u8]) {
    let content_type = content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 200 OK\r\n{}Content-Length: {}\r\nConnection: close\r\n\r\n",
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

fn write_status(stream: &mut std::net::TcpStream, code: u16) {
    let head = format!(
        "HTTP/1.1 {} Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        code
    );
    let _ = stream.write_all(head.as_bytes());
}
