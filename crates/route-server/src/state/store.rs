//! Handles shared by every request: the session actor, the model stream and
//! the Overpass client.

use crate::config::Config;
use crate::loops::session_loop::{run_session_loop, SessionCommand, StreamMessage};
use route_core::{HemisphereFormatter, RouteEditor, TableLabels, WebMercator};
use route_overpass::{OverpassClient, OverpassError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};

const COMMAND_BUFFER: usize = 64;
const STREAM_BUFFER: usize = 128;

#[derive(Debug, Error)]
#[error("edit session loop is not running")]
pub struct SessionUnavailable;

pub struct AppState {
    commands: mpsc::Sender<SessionCommand>,
    pub tx: broadcast::Sender<StreamMessage>,
    overpass: OverpassClient,
    config: Config,
}

impl AppState {
    /// Build the state and spawn the session actor on the current runtime.
    pub fn new(config: Config) -> Result<Self, OverpassError> {
        let overpass = OverpassClient::new(
            config.overpass_url.clone(),
            Duration::from_secs(config.overpass_timeout_s),
        )?;

        let editor = RouteEditor::new(Box::new(WebMercator), Box::new(HemisphereFormatter))
            .with_labels(TableLabels::for_language(&config.table_lang))
            .with_unit(config.distance_unit)
            .with_coord_style(config.coord_style);

        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let (tx, _) = broadcast::channel(STREAM_BUFFER);
        tokio::spawn(run_session_loop(editor, rx, tx.clone()));

        Ok(Self {
            commands,
            tx,
            overpass,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn overpass(&self) -> &OverpassClient {
        &self.overpass
    }

    /// Send a command built around a reply channel and wait for the answer.
    pub async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionUnavailable> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SessionUnavailable)?;
        rx.await.map_err(|_| SessionUnavailable)
    }
}
