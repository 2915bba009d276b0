//! Edit-session actor.
//!
//! Owns the [`RouteEditor`] and applies commands one at a time from an mpsc
//! channel. Every new display model is published on the broadcast channel
//! for WebSocket subscribers.

use route_core::{
    DisplayModel, EditEvent, EditMode, ExportFile, ExportFormat, OpenPicker, RouteEditor,
    SessionError, SessionSnapshot,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot};
use uuid::Uuid;

pub type Reply<T> = oneshot::Sender<T>;

/// Requests handled by the session actor.
#[derive(Debug)]
pub enum SessionCommand {
    Event {
        event: EditEvent,
        reply: Reply<Result<Option<DisplayModel>, SessionError>>,
    },
    Snapshot {
        reply: Reply<SessionView>,
    },
    Export {
        format: ExportFormat,
        trip_name: String,
        reply: Reply<Result<ExportFile, SessionError>>,
    },
    /// Lookup position for `desc_<index>`, rejected while a picker is open
    PickerTarget {
        index: usize,
        reply: Reply<Result<(f64, f64), SessionError>>,
    },
    OpenPicker {
        index: usize,
        options: Option<Vec<String>>,
        reply: Reply<Result<OpenPicker, SessionError>>,
    },
    ConfirmPicker {
        label: String,
        reply: Reply<Result<DisplayModel, SessionError>>,
    },
    CancelPicker {
        reply: Reply<Result<Option<OpenPicker>, SessionError>>,
    },
}

/// Snapshot plus the id of the running session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

/// Message fanned out to stream subscribers.
#[derive(Debug, Clone)]
pub struct StreamMessage {
    pub session_id: Option<String>,
    pub payload: Arc<str>,
}

#[derive(Serialize)]
struct ModelUpdate<'a> {
    session_id: Option<&'a str>,
    mode: EditMode,
    model: &'a DisplayModel,
}

/// Run the actor until every command sender is dropped.
pub async fn run_session_loop(
    mut editor: RouteEditor,
    mut rx: mpsc::Receiver<SessionCommand>,
    tx: broadcast::Sender<StreamMessage>,
) {
    let mut session_id: Option<String> = None;

    while let Some(command) = rx.recv().await {
        match command {
            SessionCommand::Event { event, reply } => {
                let starting = matches!(event, EditEvent::StartEdit);
                let stopping = matches!(event, EditEvent::StopEdit);
                let result = editor.handle(event);

                if result.is_ok() {
                    if starting {
                        let id = Uuid::new_v4().to_string();
                        tracing::info!("Session {} started", id);
                        session_id = Some(id);
                    }
                    if let Ok(Some(model)) = &result {
                        publish(&tx, session_id.as_deref(), editor.mode(), model);
                    }
                    if stopping {
                        tracing::info!("Session {} stopped", session_id.as_deref().unwrap_or("-"));
                        session_id = None;
                    }
                }
                let _ = reply.send(result);
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(SessionView {
                    session_id: session_id.clone(),
                    snapshot: editor.snapshot(),
                });
            }
            SessionCommand::Export {
                format,
                trip_name,
                reply,
            } => {
                let _ = reply.send(editor.export(format, &trip_name));
            }
            SessionCommand::PickerTarget { index, reply } => {
                let result = editor
                    .ensure_picker_available()
                    .and_then(|_| editor.picker_target_position(index));
                let _ = reply.send(result);
            }
            SessionCommand::OpenPicker {
                index,
                options,
                reply,
            } => {
                let _ = reply.send(editor.open_picker(index, options));
            }
            SessionCommand::ConfirmPicker { label, reply } => {
                let result = editor.confirm_picker(&label);
                if let Ok(model) = &result {
                    publish(&tx, session_id.as_deref(), editor.mode(), model);
                }
                let _ = reply.send(result);
            }
            SessionCommand::CancelPicker { reply } => {
                let _ = reply.send(editor.cancel_picker());
            }
        }
    }

    tracing::info!("Session loop stopped");
}

fn publish(
    tx: &broadcast::Sender<StreamMessage>,
    session_id: Option<&str>,
    mode: EditMode,
    model: &DisplayModel,
) {
    if tx.receiver_count() == 0 {
        return;
    }
    let update = ModelUpdate {
        session_id,
        mode,
        model,
    };
    match serde_json::to_string(&update) {
        Ok(payload) => {
            let _ = tx.send(StreamMessage {
                session_id: session_id.map(str::to_string),
                payload: Arc::from(payload),
            });
        }
        Err(e) => tracing::error!("Failed to serialize display model: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::{HemisphereFormatter, LonLat, Point};

    fn spawn() -> (mpsc::Sender<SessionCommand>, broadcast::Receiver<StreamMessage>) {
        let editor = RouteEditor::new(Box::new(LonLat), Box::new(HemisphereFormatter));
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (tx, rx) = broadcast::channel(8);
        tokio::spawn(run_session_loop(editor, cmd_rx, tx));
        (cmd_tx, rx)
    }

    async fn send(commands: &mpsc::Sender<SessionCommand>, event: EditEvent) -> Result<Option<DisplayModel>, SessionError> {
        let (reply, rx) = oneshot::channel();
        commands.send(SessionCommand::Event { event, reply }).await.unwrap();
        rx.await.unwrap()
    }

    #[tokio::test]
    async fn models_are_broadcast_with_session_id() {
        let (commands, mut updates) = spawn();

        send(&commands, EditEvent::StartEdit).await.unwrap();
        let started = updates.recv().await.unwrap();
        let session_id = started.session_id.clone().expect("session id");

        send(
            &commands,
            EditEvent::DrawEnd {
                points: vec![Point::new(10.0, 54.0), Point::new(10.0, 54.1)],
            },
        )
        .await
        .unwrap();
        let drawn = updates.recv().await.unwrap();
        assert_eq!(drawn.session_id.as_deref(), Some(session_id.as_str()));

        let payload: serde_json::Value = serde_json::from_str(&drawn.payload).unwrap();
        assert_eq!(payload["mode"], "editing");
        assert_eq!(payload["model"]["rows"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejected_events_are_not_broadcast() {
        let (commands, mut updates) = spawn();
        let err = send(&commands, EditEvent::ModifyStart).await.unwrap_err();
        assert_eq!(err, SessionError::NotActive);
        assert!(updates.try_recv().is_err());
    }

    #[tokio::test]
    async fn stop_clears_session_id() {
        let (commands, _updates) = spawn();
        send(&commands, EditEvent::StartEdit).await.unwrap();
        send(&commands, EditEvent::StopEdit).await.unwrap();

        let (reply, rx) = oneshot::channel();
        commands.send(SessionCommand::Snapshot { reply }).await.unwrap();
        let view = rx.await.unwrap();
        assert!(view.session_id.is_none());
        assert_eq!(view.snapshot.mode, EditMode::Idle);
    }
}
