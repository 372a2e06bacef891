//! Minimal HTTP/1.1 server standing in for the upstream file host.
//!
//! Answers HEAD with 200 for a fixed set of paths and 404 otherwise, and
//! records every request line. A "silent" variant accepts connections but
//! never responds, for exercising probe timeouts.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub struct HeadServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub base: String,
    /// Request lines seen so far ("HEAD /a/b.zip HTTP/1.1").
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl HeadServer {
    pub fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread where `existing` paths answer 200.
/// The server runs until the process exits.
pub fn start(existing: &[&str]) -> HeadServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let existing: Arc<Vec<String>> = Arc::new(existing.iter().map(|s| s.to_string()).collect());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let existing = Arc::clone(&existing);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &existing, &seen));
        }
    });
    HeadServer {
        base: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

/// Accepts connections and holds them open without ever answering.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A local URL nothing listens on.
pub fn refused_base() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: TcpStream, existing: &[String], seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 4096];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let line = request.lines().next().unwrap_or("").trim().to_string();
    seen.lock().unwrap().push(line.clone());

    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("");

    let response = if !method.eq_ignore_ascii_case("HEAD") {
        "HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    } else if existing.iter().any(|p| p == path) {
        "HTTP/1.1 200 OK\r\nContent-Length: 1024\r\nContent-Type: application/zip\r\nConnection: close\r\n\r\n"
    } else {
        "HTTP/1.1 404 Not Found\r\nContent-Length: 14\r\nConnection: close\r\n\r\n"
    };
    let _ = stream.write_all(response.as_bytes());
}
