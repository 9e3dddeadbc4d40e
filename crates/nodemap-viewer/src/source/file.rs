use anyhow::{Context, Result};
use bevy::prelude::Resource;
use crossbeam_channel::Sender;
use nodemap_core::{ApiResponse, SnapshotFile};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use crate::source::Incoming;

#[derive(Resource, Clone)]
pub struct ReaderHandle {
    reload: Arc<Notify>,
    pub path: PathBuf,
}

impl ReaderHandle {
    pub fn request_reload(&self) {
        self.reload.notify_one();
    }
}

/// Watches the snapshot file on its own thread and forwards every new
/// snapshot (or read failure) to `tx`.
pub fn spawn_reader(path: PathBuf, poll: Duration, tx: Sender<Incoming>) -> ReaderHandle {
    let reload = Arc::new(Notify::new());
    let handle = ReaderHandle {
        reload: Arc::clone(&reload),
        path: path.clone(),
    };

    std::thread::spawn(move || {
        let source = path.display().to_string();
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                let _ = tx.send(Incoming::error(source, format!("tokio runtime: {e}")));
                return;
            }
        };
        rt.block_on(run(path, poll, reload, tx));
    });

    handle
}

async fn run(path: PathBuf, poll: Duration, reload: Arc<Notify>, tx: Sender<Incoming>) {
    let source = path.display().to_string();
    let mut ticker = tokio::time::interval(poll.max(Duration::from_millis(100)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_modified = None;
    let mut last_error: Option<String> = None;
    let mut force = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = reload.notified() => force = true,
        }

        let polled = poll_once(&path, &mut last_modified, force).await;
        force = false;

        let msg = match polled {
            Ok(Some(resp)) => {
                last_error = None;
                tracing::info!(
                    source = %source,
                    network = %resp.network,
                    nodes = resp.nodes.len(),
                    "snapshot loaded"
                );
                Incoming::snapshot(source.clone(), resp)
            }
            Ok(None) => continue,
            Err(e) => {
                let text = format!("{e:#}");
                if last_error.as_deref() == Some(text.as_str()) {
                    continue;
                }
                tracing::warn!(source = %source, error = %text, "snapshot read failed");
                last_error = Some(text.clone());
                Incoming::error(source.clone(), text)
            }
        };

        if tx.send(msg).is_err() {
            // viewer gone
            break;
        }
    }
}

/// Reads the snapshot if it changed since `last_modified` (or when forced).
async fn poll_once(
    path: &Path,
    last_modified: &mut Option<SystemTime>,
    force: bool,
) -> Result<Option<ApiResponse>> {
    let meta = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("stat snapshot {}", path.display()))?;
    let modified = meta.modified().ok();
    if !force && modified.is_some() && modified == *last_modified {
        return Ok(None);
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read snapshot {}", path.display()))?;
    let resp = decode_snapshot(&bytes)
        .with_context(|| format!("decode snapshot {}", path.display()))?;
    *last_modified = modified;
    Ok(Some(resp))
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<ApiResponse> {
    let file = SnapshotFile::from_slice(bytes)
        .context("snapshot is neither a response object nor a node array")?;
    Ok(file.into_response())
}
