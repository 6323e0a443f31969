//! Shared test utilities and fixtures.

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use ordertab::models::{Order, Restaurant, User};
use ordertab::tui::{App, Event, Message};

pub const ORDERS_JSON: &str = include_str!("../fixtures/orders.json");
pub const ORDER_DETAIL_JSON: &str = include_str!("../fixtures/order_detail.json");
pub const RESTAURANT_JSON: &str = include_str!("../fixtures/restaurant.json");
pub const VALIDATION_ERROR_JSON: &str = include_str!("../fixtures/validation_error.json");
pub const LOGIN_JSON: &str = include_str!("../fixtures/login.json");

pub const BASE_URL: &str = "http://localhost:3000";

pub fn orders() -> Vec<Order> {
    serde_json::from_str(ORDERS_JSON).expect("orders fixture")
}

pub fn order_detail() -> Order {
    serde_json::from_str(ORDER_DETAIL_JSON).expect("order detail fixture")
}

pub fn restaurant() -> Restaurant {
    serde_json::from_str(RESTAURANT_JSON).expect("restaurant fixture")
}

pub fn customer() -> User {
    serde_json::from_str(LOGIN_JSON).expect("login fixture")
}

/// App with a logged-in customer, on the orders screen.
pub fn logged_in_app() -> App {
    App::new(BASE_URL, Some(customer()))
}

/// Key press message for a character.
pub fn char_key(c: char) -> Message {
    key(KeyCode::Char(c))
}

/// Key press message.
pub fn key(code: KeyCode) -> Message {
    Message::Input(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

/// A request as seen by [`serve`].
#[derive(Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Serves one canned `(status, body)` reply per connection on a loopback
/// port and records what was asked. Returns the base URL and a handle that
/// yields the recorded requests once every reply was sent.
pub async fn serve(
    replies: Vec<(u16, &'static str)>,
) -> (String, tokio::task::JoinHandle<Vec<Recorded>>) {
    use tokio::io::AsyncWriteExt;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let mut seen = Vec::new();
        for (status, body) in replies {
            let (mut socket, _) = listener.accept().await.expect("accept");
            seen.push(read_request(&mut socket).await);

            let reason = match status {
                200 => "OK",
                201 => "Created",
                204 => "No Content",
                401 => "Unauthorized",
                422 => "Unprocessable Entity",
                _ => "Error",
            };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("write reply");
            let _ = socket.shutdown().await;
        }
        seen
    });

    (format!("http://{addr}"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> Recorded {
    use tokio::io::AsyncReadExt;

    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        assert!(n > 0, "connection closed before headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let mut content_length = 0;
    let mut authorization = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().unwrap_or(0);
            } else if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.to_string());
            }
        }
    }

    while buf.len() < head_end + content_length {
        let n = socket.read(&mut chunk).await.expect("read body");
        assert!(n > 0, "connection closed before body");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[head_end..head_end + content_length]).to_string();

    Recorded {
        method,
        path,
        authorization,
        body,
    }
}

/// Client for a stub started with [`serve`].
pub fn client(base_url: &str) -> ordertab::api::ApiClient {
    ordertab::api::ApiClient::new(&ordertab::config::ApiConfig {
        base_url: base_url.to_string(),
        ca_cert: None,
        timeout: std::time::Duration::from_secs(5),
    })
    .expect("client")
}

/// Session with the fixture customer and a known token.
pub fn session() -> ordertab::auth::Session {
    ordertab::auth::Session::new(customer(), "b4c6e5f3d2a1")
}
