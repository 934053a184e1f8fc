use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

/// One request as the mock prediction service saw it.
#[derive(Debug, Default)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Canned reply for the next request.
pub struct Reply {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn csv(body: &str) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type: "text/csv",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn error(status: u16, reason: &'static str, body: &str) -> Self {
        Self {
            status,
            reason,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }
}

/// Serve exactly one request on a random local port.
///
/// Returns the base URL and a handle yielding what the client sent.
pub fn serve_once(reply: Reply) -> (String, JoinHandle<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock service");
    let addr = listener.local_addr().expect("mock service address");
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let request = read_request(&mut reader);
        let mut stream = stream;
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            reply.status,
            reply.reason,
            reply.content_type,
            reply.body.len()
        );
        stream.write_all(head.as_bytes()).expect("write head");
        stream.write_all(&reply.body).expect("write body");
        stream.flush().expect("flush");
        request
    });
    (format!("http://{addr}"), handle)
}

fn read_request(reader: &mut impl BufRead) -> RecordedRequest {
    let mut line = String::new();
    reader.read_line(&mut line).expect("request line");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).expect("header line");
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((key, value)) = header.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).expect("request body");
    RecordedRequest {
        method,
        path,
        headers,
        body,
    }
}
