//! Worker thread owning the tokio runtime that services catalog fetches.

use std::{sync::Arc, thread, time::Duration};

use client_core::{
    fetch_until_cancelled, CatalogSource, FileCatalogSource, StaticCatalogSource,
    UnavailableCatalogSource,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::{BackendCommand, FetchRequest};
use crate::config::Settings;
use crate::controller::events::UiEvent;

/// Picks the catalog source the settings ask for.
pub fn source_from_settings(settings: &Settings) -> Arc<dyn CatalogSource> {
    let delay = Duration::from_millis(settings.fetch_delay_ms);
    if settings.simulate_failure {
        Arc::new(UnavailableCatalogSource::new("simulated catalog outage", delay))
    } else if let Some(path) = &settings.catalog_path {
        Arc::new(FileCatalogSource::new(path.clone(), delay))
    } else {
        Arc::new(StaticCatalogSource::demo(delay))
    }
}

/// Runs one request to completion and forwards the result unless it was cancelled.
pub async fn run_fetch(
    source: Arc<dyn CatalogSource>,
    request: FetchRequest,
    ui_tx: Sender<UiEvent>,
) {
    let FetchRequest { request_id, cancel } = request;
    let Some(result) = fetch_until_cancelled(source.as_ref(), &cancel).await else {
        return;
    };
    if cancel.is_cancelled() {
        tracing::debug!(request_id = request_id.0, "fetch settled after cancel; not forwarding");
        return;
    }

    match ui_tx.try_send(UiEvent::from_fetch(request_id, result)) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            tracing::warn!(
                request_id = request_id.0,
                "ui event queue full; dropping catalog result"
            );
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!(request_id = request_id.0, "ui gone; dropping catalog result");
        }
    }
}

pub fn launch(
    source: Arc<dyn CatalogSource>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        tracing::info!(source = %source.describe(), "backend worker started");
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchCatalog(request) => {
                        tokio::spawn(run_fetch(source.clone(), request, ui_tx.clone()));
                    }
                    BackendCommand::Shutdown => break,
                }
            }
        });
        tracing::info!("backend worker stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::CancelToken;
    use crossbeam_channel::bounded;

    use crate::controller::events::RequestId;

    fn request(id: u64) -> FetchRequest {
        FetchRequest {
            request_id: RequestId(id),
            cancel: CancelToken::new(),
        }
    }

    #[test]
    fn worker_forwards_fetched_catalog_to_ui() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let source = Arc::new(StaticCatalogSource::demo(Duration::from_millis(10)));
        let worker = launch(source, cmd_rx, ui_tx);

        cmd_tx
            .send(BackendCommand::FetchCatalog(request(1)))
            .expect("queue fetch");
        let event = ui_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("catalog event");

        match event {
            UiEvent::CatalogLoaded {
                request_id,
                entries,
            } => {
                assert_eq!(request_id, RequestId(1));
                assert_eq!(entries.len(), 10);
            }
            UiEvent::CatalogFailed { error, .. } => panic!("unexpected failure: {error}"),
        }

        cmd_tx.send(BackendCommand::Shutdown).expect("queue shutdown");
        worker.join().expect("worker joins");
    }

    #[test]
    fn cancelled_request_sends_nothing() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let source = Arc::new(StaticCatalogSource::demo(Duration::from_millis(200)));
        let worker = launch(source, cmd_rx, ui_tx);

        let fetch = request(7);
        let cancel = fetch.cancel.clone();
        cmd_tx
            .send(BackendCommand::FetchCatalog(fetch))
            .expect("queue fetch");
        cancel.cancel();

        assert!(ui_rx.recv_timeout(Duration::from_millis(500)).is_err());

        cmd_tx.send(BackendCommand::Shutdown).expect("queue shutdown");
        worker.join().expect("worker joins");
    }

    #[test]
    fn settings_select_source() {
        let mut settings = Settings::default();
        settings.fetch_delay_ms = 0;
        assert!(source_from_settings(&settings)
            .describe()
            .starts_with("static catalog"));

        settings.catalog_path = Some("books.json".into());
        assert!(source_from_settings(&settings)
            .describe()
            .starts_with("catalog file"));

        settings.simulate_failure = true;
        assert!(source_from_settings(&settings)
            .describe()
            .starts_with("unavailable catalog"));
    }
}
