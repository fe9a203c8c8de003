use crate::AppState;
use axum::extract::ws::{close_code, CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use log::*;
use sessions::message::{Ack, Handshake, SESSION_EXPIRED};
use std::borrow::Cow;
use tokio::time::{interval, timeout};

/// Upgrades the connection and hands it to a per-connection watcher
/// task. Authorization happens in-protocol via the handshake frame, not
/// through the request-header gate.
pub(crate) async fn liveness(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| watch_session(socket, app_state))
}

/// Runs one liveness channel: handshake, verification, then a poll loop
/// that closes the channel the moment the presented session stops
/// matching the registry. The registry is only ever touched between
/// suspension points; no lock is held across an await.
async fn watch_session(mut socket: WebSocket, app_state: AppState) {
    let config = &app_state.config;

    // Handshake: wait for one frame carrying the claimed email and
    // token. An abandoned handshake closes silently with nothing sent.
    let handshake = match timeout(config.liveness_handshake_timeout(), socket.recv()).await {
        Err(_) => {
            debug!("liveness handshake timed out, closing");
            return;
        }
        Ok(None) | Ok(Some(Err(_))) => return,
        Ok(Some(Ok(Message::Close(_)))) => return,
        Ok(Some(Ok(Message::Text(payload)))) => Handshake::parse(&payload),
        // Anything that is not a text frame cannot be a valid claim.
        Ok(Some(Ok(_))) => None,
    };

    let Some(handshake) = handshake else {
        let _ = socket.send(Message::Text(Ack::Fail.as_str().into())).await;
        let _ = socket.send(Message::Close(None)).await;
        return;
    };

    // Verification: one registry lookup against the presented token.
    if !app_state
        .session_registry()
        .is_current(&handshake.email, &handshake.token)
    {
        debug!(
            "liveness handshake rejected for {}: session not current",
            handshake.email
        );
        let _ = socket.send(Message::Text(Ack::Fail.as_str().into())).await;
        let _ = socket.send(Message::Close(None)).await;
        return;
    }

    if socket
        .send(Message::Text(Ack::Ok.as_str().into()))
        .await
        .is_err()
    {
        return;
    }

    debug!("liveness channel verified for {}", handshake.email);

    // Liveness loop: re-check the registry every poll interval and watch
    // the socket so a client-side disconnect ends the task promptly.
    let mut poll = interval(config.liveness_poll_interval());
    loop {
        tokio::select! {
            _ = poll.tick() => {
                if app_state
                    .session_registry()
                    .is_current(&handshake.email, &handshake.token)
                {
                    continue;
                }

                info!(
                    "session for {} no longer current, closing liveness channel",
                    handshake.email
                );
                let _ = socket
                    .send(Message::Close(Some(CloseFrame {
                        code: close_code::NORMAL,
                        reason: Cow::from(SESSION_EXPIRED),
                    })))
                    .await;
                // Some transports complete the close handshake
                // asynchronously; keep draining until the peer is done
                // or the grace period runs out.
                let _ = timeout(config.liveness_close_grace(), drain(&mut socket)).await;
                return;
            }
            incoming = socket.recv() => {
                match incoming {
                    None | Some(Err(_)) | Some(Ok(Message::Close(_))) => {
                        debug!("liveness channel for {} closed by client", handshake.email);
                        return;
                    }
                    // No application messages are expected after the ack.
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

async fn drain(socket: &mut WebSocket) {
    while let Some(Ok(message)) = socket.recv().await {
        if matches!(message, Message::Close(_)) {
            return;
        }
    }
}
