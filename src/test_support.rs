use crate::client::{IndexAck, IndexClient};
use crate::document::{Document, IndexTarget};
use crate::error::IndexError;
use async_trait::async_trait;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// In-memory client that records every call and optionally fails them.
#[derive(Default)]
pub(crate) struct RecordingClient {
    calls: Mutex<Vec<(IndexTarget, Document)>>,
    fail_status: Option<u16>,
}

impl RecordingClient {
    pub(crate) fn failing(status: u16) -> Self {
        RecordingClient {
            calls: Mutex::new(Vec::new()),
            fail_status: Some(status),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(IndexTarget, Document)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IndexClient for RecordingClient {
    async fn index(&self, target: &IndexTarget, document: &Document) -> Result<IndexAck, IndexError> {
        self.calls
            .lock()
            .unwrap()
            .push((target.clone(), document.clone()));

        match self.fail_status {
            Some(status) => Err(IndexError::Rejected {
                status,
                body: "rejected by test client".to_string(),
            }),
            None => Ok(IndexAck {
                index: Some(target.index.clone()),
                id: Some(format!("doc-{}", self.calls.lock().unwrap().len())),
                result: Some("created".to_string()),
            }),
        }
    }
}

/// Minimal HTTP/1.1 server answering every request with one canned
/// response. Runs on plain threads so it works under any test runtime.
pub(crate) struct HttpStub {
    pub(crate) port: u16,
    requests: Arc<AtomicUsize>,
    heads: Arc<Mutex<Vec<String>>>,
}

impl HttpStub {
    pub(crate) fn start(status: &str, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(AtomicUsize::new(0));
        let heads = Arc::new(Mutex::new(Vec::new()));
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );

        let (requests_bg, heads_bg) = (Arc::clone(&requests), Arc::clone(&heads));
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let (requests, heads, response) =
                    (Arc::clone(&requests_bg), Arc::clone(&heads_bg), response.clone());
                thread::spawn(move || serve(stream, &requests, &heads, &response));
            }
        });

        HttpStub { port, requests, heads }
    }

    pub(crate) fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub(crate) fn first_request_head(&self) -> String {
        self.heads.lock().unwrap().first().cloned().unwrap_or_default()
    }
}

fn serve(mut stream: TcpStream, requests: &AtomicUsize, heads: &Mutex<Vec<String>>, response: &str) {
    let mut buf = [0u8; 8192];
    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        let chunk = String::from_utf8_lossy(&buf[..n]);
        for head in chunk.split("POST ").skip(1) {
            requests.fetch_add(1, Ordering::SeqCst);
            heads.lock().unwrap().push(format!("POST {head}"));
            if stream.write_all(response.as_bytes()).is_err() {
                return;
            }
        }
    }
}
