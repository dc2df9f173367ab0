// Stand-in for the shrink service, served by actix-web on a random port.
//
// `POST /shrink` pops the next queued `Reply`; `GET /output/{id}` serves the
// body registered for that id. Every request is recorded for assertions.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};

/// What the stub answers to the next shrink request.
pub enum Reply {
    /// A normal result whose download yields `body`.
    Shrunk { ratio: f64, body: Vec<u8> },
    /// A result pointing at an output that does not exist (404 on GET).
    Dangling { ratio: f64 },
    /// Raw text with status 200.
    Raw(String),
    /// An error status with a body.
    Status(u16, String),
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

struct State {
    addr: SocketAddr,
    replies: VecDeque<Reply>,
    outputs: HashMap<String, Vec<u8>>,
    requests: Vec<Recorded>,
    next_id: usize,
}

type Shared = Mutex<State>;

pub struct StubServer {
    addr: SocketAddr,
    state: Arc<Shared>,
}

impl StubServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(State {
            addr,
            replies: replies.into(),
            outputs: HashMap::new(),
            requests: Vec::new(),
            next_id: 0,
        }));

        let shared = Arc::clone(&state);
        thread::spawn(move || {
            actix_web::rt::System::new().block_on(async move {
                let server = HttpServer::new(move || {
                    App::new()
                        .app_data(web::Data::from(Arc::clone(&shared)))
                        .route("/shrink", web::post().to(shrink))
                        .route("/output/{id}", web::get().to(output))
                })
                .workers(1)
                .disable_signals()
                .listen(listener)?;
                server.run().await
            })
        });

        Self { addr, state }
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/shrink", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        lock(&self.state).requests.clone()
    }

    pub fn shrink_requests(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == "POST")
            .collect()
    }
}

fn lock(state: &Shared) -> std::sync::MutexGuard<'_, State> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn record(req: &HttpRequest, body: &[u8]) -> Recorded {
    Recorded {
        method: req.method().as_str().to_string(),
        path: req.path().to_string(),
        headers: req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: body.to_vec(),
    }
}

fn shrink_json(addr: SocketAddr, id: &str, ratio: f64) -> String {
    format!(
        r#"{{"input":{{"size":100,"type":"image/jpeg"}},"output":{{"size":80,"ratio":{ratio},"url":"http://{addr}/output/{id}"}}}}"#
    )
}

async fn shrink(state: web::Data<Shared>, req: HttpRequest, body: web::Bytes) -> HttpResponse {
    let mut state = lock(&state);
    state.requests.push(record(&req, &body));
    let addr = state.addr;

    match state.replies.pop_front() {
        Some(Reply::Shrunk { ratio, body }) => {
            state.next_id += 1;
            let id = state.next_id.to_string();
            state.outputs.insert(id.clone(), body);
            HttpResponse::Ok()
                .content_type("application/json")
                .body(shrink_json(addr, &id, ratio))
        }
        Some(Reply::Dangling { ratio }) => HttpResponse::Ok()
            .content_type("application/json")
            .body(shrink_json(addr, "missing", ratio)),
        Some(Reply::Raw(text)) => HttpResponse::Ok().content_type("text/html").body(text),
        Some(Reply::Status(code, text)) => {
            HttpResponse::build(StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST))
                .content_type("application/json")
                .body(text)
        }
        None => HttpResponse::InternalServerError().body("no reply queued"),
    }
}

async fn output(
    state: web::Data<Shared>,
    req: HttpRequest,
    id: web::Path<String>,
) -> HttpResponse {
    let mut state = lock(&state);
    state.requests.push(record(&req, &[]));

    match state.outputs.get(id.as_str()) {
        Some(body) => HttpResponse::Ok()
            .content_type("image/jpeg")
            .body(body.clone()),
        None => HttpResponse::NotFound().body("not found"),
    }
}
