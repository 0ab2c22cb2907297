//! A local stand-in for the YouTube Data API that records every request it receives.

#![allow(dead_code)]

use bytes::Bytes;
use http_body_util::Full;
use hyper::body;
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use youtube_videos::{VideoRecord, YouTubeClient};

/// One request as seen by the fake API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// The last path segment, e.g. `search` or `playlistItems`.
    pub endpoint: String,
    pub params: HashMap<String, String>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// What the fake API answers with.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub status: StatusCode,
    pub body: String,
}

impl FakeResponse {
    pub fn json(value: serde_json::Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    pub fn error(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

type Responder = dyn Fn(&RecordedRequest) -> FakeResponse + Send + Sync;

pub struct FakeDataApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeDataApi {
    /// Starts serving on a random local port; `responder` decides every answer.
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> FakeResponse + Send + Sync + 'static,
    {
        let socket = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to localhost");
        let addr = socket.local_addr().expect("get local address");
        let responder: Arc<Responder> = Arc::new(responder);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((conn, _)) = socket.accept().await else {
                    return;
                };
                let conn = hyper_util::rt::TokioIo::new(conn);
                let responder = Arc::clone(&responder);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<body::Incoming>| {
                        let request = record(&req);
                        recorded.lock().unwrap().push(request.clone());
                        let reply = responder(&request);
                        async move {
                            let mut response = Response::new(Full::<Bytes>::from(reply.body));
                            *response.status_mut() = reply.status;
                            response
                                .headers_mut()
                                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                            Ok::<_, Infallible>(response)
                        }
                    });
                    let _ = hyper::server::conn::http1::Builder::new()
                        .serve_connection(conn, service)
                        .await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/youtube/v3"),
            requests,
        }
    }

    /// A client pointed at this fake API.
    pub fn client(&self) -> YouTubeClient {
        YouTubeClient::new(TEST_KEY)
            .expect("test key is not blank")
            .with_base_url(&self.base_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.endpoint).collect()
    }
}

pub const TEST_KEY: &str = "test-api-key";

fn record(req: &Request<body::Incoming>) -> RecordedRequest {
    let endpoint = req
        .uri()
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let params = form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
        .into_owned()
        .collect();
    RecordedRequest { endpoint, params }
}

/// A deterministic 11-character video id.
pub fn video_id(n: usize) -> String {
    format!("vid{n:08}")
}

/// The records expected for videos `range`, titled `Video <n>`.
pub fn expected_videos(range: std::ops::Range<usize>) -> Vec<VideoRecord> {
    range
        .map(|n| VideoRecord::new(format!("Video {n}"), &video_id(n)))
        .collect()
}

/// A `playlistItems.list` page holding videos `range`.
pub fn playlist_page(range: std::ops::Range<usize>, next: Option<&str>) -> serde_json::Value {
    let items: Vec<_> = range
        .map(|n| {
            serde_json::json!({
                "kind": "youtube#playlistItem",
                "snippet": {
                    "title": format!("Video {n}"),
                    "resourceId": { "kind": "youtube#video", "videoId": video_id(n) }
                }
            })
        })
        .collect();
    page(items, next)
}

/// A `search.list` page holding videos `range`.
pub fn search_page(range: std::ops::Range<usize>, next: Option<&str>) -> serde_json::Value {
    let items: Vec<_> = range
        .map(|n| {
            serde_json::json!({
                "kind": "youtube#searchResult",
                "id": { "kind": "youtube#video", "videoId": video_id(n) },
                "snippet": { "title": format!("Video {n}") }
            })
        })
        .collect();
    page(items, next)
}

fn page(items: Vec<serde_json::Value>, next: Option<&str>) -> serde_json::Value {
    let mut page = serde_json::json!({
        "pageInfo": { "totalResults": 1000000, "resultsPerPage": 50 },
        "items": items,
    });
    if let Some(next) = next {
        page["nextPageToken"] = serde_json::Value::from(next);
    }
    page
}

/// Serves pages of 50 numbered items from a source of `total` items, using the page index
/// as the continuation token.
pub fn paged(
    req: &RecordedRequest,
    total: usize,
    page_of: fn(std::ops::Range<usize>, Option<&str>) -> serde_json::Value,
) -> FakeResponse {
    let index: usize = req.param("pageToken").map_or(0, |t| t.parse().unwrap());
    let start = index * 50;
    let end = (start + 50).min(total);
    let next = (end < total).then(|| (index + 1).to_string());
    FakeResponse::json(page_of(start..end, next.as_deref()))
}

/// A Data API error envelope.
pub fn api_error(code: u16, message: &str) -> String {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message,
            "errors": [{ "message": message, "domain": "youtube.quota", "reason": "quotaExceeded" }]
        }
    })
    .to_string()
}
