use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use paperclip_core::Snapshot;

use crate::fetch::{Endpoints, FetchSettings, Fetcher, ReqwestFetcher};
use crate::repository::{Repository, RepositoryStatus};
use crate::EngineEvent;

enum EngineCommand {
    Refresh,
}

/// Runs refreshes on a background tokio runtime for a synchronous UI loop.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    repository: Arc<Repository>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, endpoints: Endpoints) -> io::Result<Self> {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings, endpoints)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let repository = Arc::new(Repository::new(fetcher));

        let worker_repository = repository.clone();
        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let repository = worker_repository.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&repository, command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx,
            repository,
        })
    }

    pub fn request_refresh(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Refresh);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn current(&self) -> Arc<Snapshot> {
        self.repository.current()
    }

    pub fn status(&self) -> RepositoryStatus {
        self.repository.status()
    }
}

async fn handle_command(
    repository: &Repository,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Refresh => {
            let result = repository.refresh().await;
            let _ = event_tx.send(EngineEvent::RefreshCompleted(result));
        }
    }
}
