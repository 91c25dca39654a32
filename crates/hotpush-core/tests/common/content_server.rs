//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of named files and records every request (path and
//! headers) so tests can assert on what the client sent. Can omit
//! Content-Length to simulate servers that don't declare a transfer size.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone, Copy)]
pub struct ContentServerOptions {
    /// If false, responses omit Content-Length; end-of-body is marked by
    /// closing the connection (transfer size unknown to the client).
    pub send_content_length: bool,
}

impl Default for ContentServerOptions {
    fn default() -> Self {
        Self {
            send_content_length: true,
        }
    }
}

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    /// Header pairs with lowercased names.
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Running test server plus the log of requests it has served.
pub struct ContentServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ContentServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

/// Starts a server in a background thread serving `files` (absolute path →
/// body, e.g. `("/content/app.js", ...)`). Unknown paths return 404. Returns
/// the server handle; `base_url` has no trailing slash. The server runs until
/// the process exits.
pub fn start(files: Vec<(&str, Vec<u8>)>) -> ContentServer {
    start_with_options(files, ContentServerOptions::default())
}

/// Like `start` but allows customizing server behavior.
pub fn start_with_options(files: Vec<(&str, Vec<u8>)>, opts: ContentServerOptions) -> ContentServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let files: Arc<HashMap<String, Vec<u8>>> = Arc::new(
        files
            .into_iter()
            .map(|(p, b)| (p.to_string(), b))
            .collect(),
    );
    let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let files = Arc::clone(&files);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &files, &log, opts));
        }
    });
    ContentServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    files: &HashMap<String, Vec<u8>>,
    log: &Mutex<Vec<RecordedRequest>>,
    opts: ContentServerOptions,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
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
    let recorded = match parse_request(request) {
        Some(r) => r,
        None => return,
    };
    let path = recorded.path.clone();
    log.lock().unwrap().push(recorded);

    let body = match files.get(&path) {
        Some(b) => b,
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
            return;
        }
    };
    let mut response = String::from("HTTP/1.1 200 OK\r\nConnection: close\r\n");
    if opts.send_content_length {
        response.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    response.push_str("\r\n");
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}

/// Returns the GET request's path and headers, or None for anything else.
fn parse_request(request: &str) -> Option<RecordedRequest> {
    let mut lines = request.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    let path = parts.next()?.to_string();
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }
    Some(RecordedRequest { path, headers })
}
