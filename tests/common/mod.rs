//! Stand-in GitHub REST API for integration tests.
//!
//! A blocking HTTP server on a random local port answers the three repository
//! endpoints from a route table and records every request line and header
//! block, so tests can point the real client at it via `github.api_base`.

#![allow(dead_code)]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::io::{Read as _, Write as _};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Clone)]
pub struct Route {
    pub path: String,
    pub status: &'static str,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Route {
    pub fn json(path: &str, body: &str) -> Self {
        Self {
            path: path.to_string(),
            status: "200 OK",
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn status(path: &str, status: &'static str) -> Self {
        Self {
            path: path.to_string(),
            status,
            body: r#"{"message":"error"}"#.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

pub struct MockGitHub {
    port: u16,
    requests: Arc<Mutex<Vec<String>>>,
    _stop: std::sync::mpsc::Sender<()>,
}

impl MockGitHub {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = std::sync::mpsc::channel::<()>();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let log = Arc::clone(&requests);
        thread::spawn(move || {
            listener.set_nonblocking(true).unwrap();
            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                match listener.accept() {
                    Ok((stream, _)) => {
                        let routes = Arc::clone(&routes);
                        let log = Arc::clone(&log);
                        thread::spawn(move || serve_request(stream, &routes, &log));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Self {
            port,
            requests,
            _stop: tx,
        }
    }

    /// Octocat-shaped repository with every endpoint succeeding.
    pub fn octocat() -> Self {
        Self::start(octocat_routes())
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Raw request heads received so far, lowercased.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub const METADATA_PATH: &str = "/repos/octocat/Hello-World";
pub const CONTENTS_PATH: &str = "/repos/octocat/Hello-World/contents";
pub const README_PATH: &str = "/repos/octocat/Hello-World/readme";

pub fn octocat_routes() -> Vec<Route> {
    let readme = STANDARD.encode("# Hello World\nHi!");
    vec![
        Route::json(
            METADATA_PATH,
            r#"{"stargazers_count":1500,"forks_count":20,"watchers_count":1500,"language":"Ruby","private":false}"#,
        ),
        Route::json(
            CONTENTS_PATH,
            r#"[
                {"name":"README","type":"file","size":13},
                {"name":"lib","type":"dir"},
                {"name":"hello.rb","type":"file"},
                {"name":"Gemfile","type":"file"}
            ]"#,
        ),
        Route::json(
            README_PATH,
            &format!(r#"{{"content":"{readme}\n","encoding":"base64"}}"#),
        ),
    ]
}

/// Replace the route for `path` in `routes`.
pub fn replace_route(mut routes: Vec<Route>, route: Route) -> Vec<Route> {
    routes.retain(|r| r.path != route.path);
    routes.push(route);
    routes
}

fn serve_request(mut stream: TcpStream, routes: &[Route], log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut head = Vec::new();
    let mut buf = [0u8; 4096];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(n) if n > 0 => head.extend_from_slice(&buf[..n]),
            _ => break,
        }
    }
    let request = String::from_utf8_lossy(&head).to_lowercase();
    let path = request
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(request);

    let route = routes.iter().find(|r| r.path.to_lowercase() == path);
    let (status, body, extra) = match route {
        Some(r) => (r.status, r.body.clone(), r.headers.clone()),
        None => ("404 Not Found", r#"{"message":"Not Found"}"#.to_string(), Vec::new()),
    };

    let mut header = format!(
        "HTTP/1.1 {status}\r\n\
         Content-Type: application/json; charset=utf-8\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n",
        body.len()
    );
    for (name, value) in extra {
        header.push_str(&format!("{name}: {value}\r\n"));
    }
    header.push_str("\r\n");
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}
