//! ac-circuit server
//! - Owns one live circuit
//! - Applies setter commands from WebSocket clients
//! - Streams derived state and datasets to every connected client

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use clap::Parser;
use futures::{stream::SplitSink, SinkExt, StreamExt};
use std::{net::SocketAddr, path::{Path, PathBuf}, sync::Arc};
use tokio::sync::{broadcast, RwLock};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info, warn};

use ac_circuit::{Circuit, CircuitParameters, Snapshot, Topology};

mod protocol;

use protocol::{Command, Frame};

#[derive(Parser, Debug)]
#[command(name = "ac-circuit-server")]
#[command(about = "Live WebSocket host for AC circuit analysis")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:3001")]
    bind: SocketAddr,

    /// Directory with a static display client to serve at /
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Initial resistance in Ohms
    #[arg(long, default_value = "10")]
    resistance: f64,

    /// Initial inductance in H
    #[arg(long, default_value = "0.1")]
    inductance: f64,

    /// Initial capacitance in F
    #[arg(long, default_value = "0.0001")]
    capacitance: f64,

    /// Initial source RMS voltage in V
    #[arg(long, default_value = "230")]
    voltage: f64,

    /// Initial source frequency in Hz
    #[arg(long, default_value = "50")]
    frequency: f64,

    /// Initial topology (R, RL, RC, RLC)
    #[arg(long, default_value = "RLC")]
    topology: Topology,
}

struct AppState {
    circuit: RwLock<Circuit>,
    frame_tx: broadcast::Sender<Arc<Vec<Frame>>>,
}

impl AppState {
    fn new(circuit: Circuit) -> Self {
        let (frame_tx, _) = broadcast::channel(16);
        Self {
            circuit: RwLock::new(circuit),
            frame_tx,
        }
    }

    async fn current_frames(&self) -> Option<Vec<Frame>> {
        let circuit = self.circuit.read().await;
        match protocol::snapshot_frames(&circuit) {
            Ok(frames) => Some(frames),
            Err(e) => {
                error!("Failed to encode snapshot: {}", e);
                None
            }
        }
    }

    /// Parse and apply one client command, then broadcast the new frames.
    /// On a malformed command returns the error text for the sender.
    async fn apply(&self, text: &str) -> Result<(), String> {
        let command = match Command::parse(text) {
            Ok(command) => command,
            Err(e) => {
                warn!("Rejected command {:?}: {}", text, e);
                return Err(protocol::encode_error(format!("Invalid command: {}", e)).unwrap_or_default());
            }
        };

        // Broadcast under the write lock so frames go out in commit order
        let mut circuit = self.circuit.write().await;
        command.apply(&mut circuit);
        info!("Applied {:?}: Z={:.3} Ohm, I={:.3} A", command, circuit.derived().z, circuit.derived().i);

        match protocol::snapshot_frames(&circuit) {
            Ok(frames) => {
                let _ = self.frame_tx.send(Arc::new(frames));
            }
            Err(e) => error!("Failed to encode snapshot: {}", e),
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let params = CircuitParameters::new(
        args.resistance,
        args.inductance,
        args.capacitance,
        args.voltage,
        args.frequency,
        args.topology,
    );
    let state = Arc::new(AppState::new(Circuit::with_parameters(params)));

    if let Some(dir) = &args.static_dir {
        info!("Serving static client from {:?}", dir);
    }
    let app = build_router(state, args.static_dir.as_deref());

    info!("Server: http://{}", args.bind);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/ws", get(ws_handler))
        .route("/state", get(state_handler));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(CorsLayer::permissive()).with_state(state)
}

async fn state_handler(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.circuit.read().await.snapshot())
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

fn to_message(frame: &Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text.clone().into()),
        Frame::Binary(data) => Message::Binary(data.clone().into()),
    }
}

async fn send_frames(sender: &mut SplitSink<WebSocket, Message>, frames: &[Frame]) -> Result<(), axum::Error> {
    for frame in frames {
        sender.send(to_message(frame)).await?;
    }
    Ok(())
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    // Subscribe first so no update between the initial snapshot and the loop is lost
    let mut rx = state.frame_tx.subscribe();

    info!("Client connected");

    if let Some(frames) = state.current_frames().await {
        if send_frames(&mut sender, &frames).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            Ok(frames) = rx.recv() => {
                if send_frames(&mut sender, &frames).await.is_err() {
                    break;
                }
            }
            Some(msg) = receiver.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        if let Err(reply) = state.apply(&text).await {
                            if sender.send(Message::Text(reply.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(Message::Close(_)) | Err(_) => break,
                    _ => {}
                }
            }
            else => break,
        }
    }

    info!("Client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::Stream;
    use tokio_tungstenite::tungstenite::{self, Message as WsMessage};

    async fn next_json<S>(ws: &mut S) -> serde_json::Value
    where
        S: Stream<Item = Result<WsMessage, tungstenite::Error>> + Unpin,
    {
        loop {
            match ws.next().await {
                Some(Ok(WsMessage::Text(text))) => return serde_json::from_str(&text).unwrap(),
                Some(Ok(_)) => continue,
                other => panic!("Expected a text frame, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_apply_updates_state() {
        let state = AppState::new(Circuit::new());
        let mut rx = state.frame_tx.subscribe();

        state.apply(r#"{"type":"setTopology","topology":"R"}"#).await.unwrap();

        let circuit = state.circuit.read().await;
        assert_eq!(circuit.parameters().topology(), Topology::R);
        assert_eq!(circuit.derived().z, 10.0);

        let frames = rx.recv().await.unwrap();
        assert_eq!(frames.len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_command_leaves_state_untouched() {
        let state = AppState::new(Circuit::new());
        let mut rx = state.frame_tx.subscribe();
        let before = state.circuit.read().await.snapshot();

        let reply = state.apply(r#"{"type":"setR","value":"ten"}"#).await.unwrap_err();
        let json: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(json["type"], "error");

        assert_eq!(state.circuit.read().await.snapshot(), before);
        assert!(rx.try_recv().is_err(), "Nothing should be broadcast");
    }

    #[tokio::test]
    async fn test_state_endpoint() {
        let state = Arc::new(AppState::new(Circuit::new()));
        let Json(snapshot) = state_handler(State(state)).await;

        assert_eq!(snapshot.sweep.len(), 200);
        assert_eq!(snapshot.waveform.len(), 600);
    }

    #[tokio::test]
    async fn test_websocket_round_trip() {
        let state = Arc::new(AppState::new(Circuit::new()));
        let app = build_router(state.clone(), None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{}/ws", addr))
            .await
            .unwrap();

        let initial = next_json(&mut ws).await;
        assert_eq!(initial["type"], "state");
        assert_eq!(initial["parameters"]["V"], 230.0);

        ws.send(WsMessage::Text(r#"{"type":"setV","value":120}"#.into()))
            .await
            .unwrap();
        let updated = next_json(&mut ws).await;
        assert_eq!(updated["parameters"]["V"], 120.0);
        assert_eq!(state.circuit.read().await.parameters().voltage(), 120.0);

        ws.send(WsMessage::Text("garbage".into())).await.unwrap();
        let reply = next_json(&mut ws).await;
        assert_eq!(reply["type"], "error");
    }
}
