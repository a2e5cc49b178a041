//! In-process stand-in for the Cadre service.
//!
//! Templates are kept in memory. Resolution follows the service's marker
//! convention: a key prefixed with `*` is resolved, and the only "secret store"
//! understood here is `echo:<json>`, which resolves to the embedded JSON value.
//! Anything else under a marked key fails the whole request with a 500.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use serde_json::{Map, Value};
use tokio::net::TcpListener;

type Templates = Arc<Mutex<BTreeMap<String, Value>>>;

#[derive(Clone, Debug)]
pub struct ReceivedRequest {
    pub method: String,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Clone)]
pub struct FakeService {
    pub addr: SocketAddr,
    templates: Templates,
    received_requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl FakeService {
    /// Start the service on a random port with no templates.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake service");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let templates: Templates = Arc::default();
        let received_requests = Arc::new(Mutex::new(Vec::new()));

        let service = Self {
            addr,
            templates,
            received_requests,
        };

        let handler = service.clone();
        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };

                let io = TokioIo::new(stream);
                let handler = handler.clone();

                tokio::spawn(async move {
                    let service = service_fn(move |req: Request<Incoming>| {
                        let handler = handler.clone();
                        async move { handler.handle(req).await }
                    });

                    let _ = http1::Builder::new().serve_connection(io, service).await;
                });
            }
        });

        service
    }

    /// Seed a template directly, bypassing the HTTP API.
    pub fn insert(&self, env: &str, template: Value) {
        self.templates
            .lock()
            .unwrap()
            .insert(env.to_string(), template);
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn get_requests(&self) -> Vec<ReceivedRequest> {
        self.received_requests.lock().unwrap().clone()
    }

    async fn handle(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, hyper::http::Error> {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let body = req
            .into_body()
            .collect()
            .await
            .map(|collected| collected.to_bytes().to_vec())
            .unwrap_or_default();

        let request = ReceivedRequest { method, path, body };
        self.received_requests.lock().unwrap().push(request.clone());

        let (status, body) = self.route(&request);
        Response::builder()
            .status(status)
            .body(Full::new(Bytes::from(body)))
    }

    fn route(&self, request: &ReceivedRequest) -> (u16, String) {
        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
        let mut templates = self.templates.lock().unwrap();

        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["ping"]) => (200, "cadre ok".to_string()),
            ("GET", ["t", env]) => match templates.get(*env) {
                Some(template) => (200, template.to_string()),
                None => (404, format!("no template for `{env}`")),
            },
            ("GET", ["c"]) => {
                let names: Vec<String> = templates.keys().cloned().collect();
                (200, Value::from(names).to_string())
            }
            ("GET", ["c", env]) => match templates.get(*env) {
                Some(template) => match resolve(template) {
                    Ok(resolved) => (200, resolved.to_string()),
                    Err(message) => (500, message),
                },
                None => (404, format!("no template for `{env}`")),
            },
            ("PUT", ["t", env]) => match serde_json::from_slice::<Value>(&request.body) {
                Ok(template @ Value::Object(_)) => {
                    templates.insert(env.to_string(), template);
                    (200, "ok".to_string())
                }
                Ok(_) => (400, "template must be a JSON object".to_string()),
                Err(err) => (400, err.to_string()),
            },
            (_, ["t", _]) | (_, ["c", ..]) | (_, ["ping"]) => (405, String::new()),
            _ => (404, String::new()),
        }
    }
}

fn resolve(value: &Value) -> Result<Value, String> {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, value) in map {
                match key.strip_prefix('*') {
                    Some(name) => {
                        let reference = value
                            .as_str()
                            .ok_or_else(|| format!("secret reference for `{name}` is not a string"))?;
                        let literal = reference
                            .strip_prefix("echo:")
                            .ok_or_else(|| format!("unsupported secret reference `{reference}`"))?;
                        let secret = serde_json::from_str(literal).map_err(|err| err.to_string())?;
                        out.insert(name.to_string(), secret);
                    }
                    None => {
                        out.insert(key.clone(), resolve(value)?);
                    }
                }
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => items.iter().map(resolve).collect::<Result<_, _>>().map(Value::Array),
        other => Ok(other.clone()),
    }
}
