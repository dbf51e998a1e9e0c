use crate::events::AppEvent;
use async_channel::Sender;
use spindle::protocol::{self, Reply, Request, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if fs_err::metadata(SOCKET_PATH).is_ok() {
        let _ = fs_err::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    handle_connection(stream, tx).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

async fn handle_connection(stream: UnixStream, tx: Sender<AppEvent>) {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match protocol::decode::<Request>(&line) {
            Ok(request) => dispatch(request, &tx).await,
            Err(e) => Reply::rejected("BadRequest", e.to_string()),
        };

        let mut encoded = match protocol::encode(&reply) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Failed to encode reply: {}", e);
                break;
            }
        };
        encoded.push('\n');

        if let Err(e) = write_half.write_all(encoded.as_bytes()).await {
            log::error!("Failed to write reply: {}", e);
            break;
        }
    }
}

/// Hands the request to the event loop and waits for its answer.
async fn dispatch(request: Request, tx: &Sender<AppEvent>) -> Reply {
    let (reply_tx, reply_rx) = async_channel::bounded(1);

    if tx
        .send(AppEvent::Request {
            request,
            reply: reply_tx,
        })
        .await
        .is_err()
    {
        return Reply::rejected("Unavailable", "rota is shutting down");
    }

    reply_rx
        .recv()
        .await
        .unwrap_or_else(|_| Reply::rejected("Unavailable", "rota dropped the request"))
}
