//! Scripted WebSocket server fixture for tests.
//!
//! Binds an in-process server that answers each incoming text frame with
//! the next canned reply, in order, then hangs up once the script is
//! exhausted. Connections are accepted sequentially and share the reply
//! script, matching the one-connection-per-`execute` discipline.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

/// Spawns the fixture and returns the port it listens on.
pub(crate) async fn spawn(replies: Vec<&'static str>) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();

    tokio::spawn(async move {
        let mut replies = replies.into_iter();

        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let Ok(mut ws) = accept_async(stream).await else {
                return;
            };

            while let Some(message) = ws.next().await {
                let Ok(message) = message else {
                    break;
                };

                if message.is_close() {
                    break;
                }
                if !message.is_text() {
                    continue;
                }

                match replies.next() {
                    Some(reply) => {
                        if ws.send(Message::Text(reply.into())).await.is_err() {
                            break;
                        }
                    }
                    // Script exhausted: drop the listener and hang up.
                    None => return,
                }
            }
        }
    });

    port
}
