//! Raw TCP endpoints for deadline, refusal, and cancellation tests

#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A server that accepts connections and reads requests but never answers.
pub struct SilentServer {
    pub addr: SocketAddr,
    /// Fires once the first accepted connection has been closed by the client.
    pub closed: oneshot::Receiver<()>,
}

impl SilentServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind silent server");
        let addr = listener.local_addr().expect("Failed to get local addr");
        let (tx, closed) = oneshot::channel();

        tokio::spawn(async move {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut buf = [0u8; 1024];
            // Swallow the request; EOF or a reset means the client let go.
            loop {
                match stream.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(_) => continue,
                }
            }
            let _ = tx.send(());
        });

        Self { addr, closed }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// An origin on a local port with nothing listening on it.
pub fn refused_origin() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get local addr");
    drop(listener);
    format!("http://{addr}")
}
