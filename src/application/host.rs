#[cfg(test)]
#[path = "host_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use futures::SinkExt;
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio::io::AsyncWrite;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::FramedRead;
use tokio_util::codec::FramedWrite;
use tokio_util::codec::LinesCodec;

use crate::domain::models::BridgeEvent;
use crate::domain::models::HostEvent;
use crate::domain::models::Surface;
use crate::domain::models::SurfaceBox;
use crate::domain::models::UiEvent;
use crate::domain::services::ChatSession;
use crate::infrastructure::surfaces::ChannelSurface;

async fn handle_event(session: Arc<ChatSession>, surface_id: String, event: UiEvent) {
    if let Err(err) = session.handle_event(&surface_id, event).await {
        tracing::error!(error = ?err, surface = %surface_id, "Failed to handle event");
    }
}

/// Runs one surface over a line based transport until the surface hangs up.
/// Submissions run in the background so a slow answer never holds up other
/// events, everything else is handled in the order it arrives.
pub async fn serve_connection<R, W>(session: Arc<ChatSession>, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<HostEvent>();
    let surface: SurfaceBox = Arc::new(ChannelSurface::new(tx));
    let surface_id = surface.id().to_string();
    session.register_surface(surface);

    let mut sink = FramedWrite::new(writer, LinesCodec::new());
    let writer_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let line = event.encode()?;
            tracing::debug!(line = %line, "Sending event");
            sink.send(line).await?;
        }

        return Ok::<(), anyhow::Error>(());
    });

    let mut lines = FramedRead::new(reader, LinesCodec::new());
    let mut submissions = JoinSet::new();
    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to read from surface");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        tracing::debug!(line = %line, "Received event");
        match UiEvent::decode(&line) {
            Ok(Some(event @ UiEvent::SendMessage { .. })) => {
                submissions.spawn(handle_event(session.clone(), surface_id.clone(), event));
            }
            Ok(Some(event)) => {
                handle_event(session.clone(), surface_id.clone(), event).await;
            }
            Ok(None) => {
                tracing::debug!(line = %line, "Ignoring unknown event");
            }
            Err(err) => {
                tracing::warn!(error = ?err, line = %line, "Dropping malformed event");
            }
        }
    }

    while let Some(res) = submissions.join_next().await {
        if let Err(err) = res {
            tracing::error!(error = ?err, "Submission task failed");
        }
    }

    session.unregister_surface(&surface_id);
    writer_task.await??;

    return Ok(());
}

async fn accept(session: Arc<ChatSession>, listener: TcpListener) -> Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        tracing::info!(addr = %addr, "Surface connected");

        let session = session.clone();
        tokio::spawn(async move {
            let (reader, writer) = stream.into_split();
            if let Err(err) = serve_connection(session, reader, writer).await {
                tracing::error!(error = ?err, addr = %addr, "Surface connection failed");
            }
            tracing::info!(addr = %addr, "Surface disconnected");
        });
    }
}

/// Serves the editor over stdio. When `listen` is set, more surfaces can
/// connect over TCP and share the same conversation. Returns once stdin
/// closes.
pub async fn start(session: Arc<ChatSession>, listen: &str) -> Result<()> {
    let stdio = serve_connection(session.clone(), tokio::io::stdin(), tokio::io::stdout());
    if listen.is_empty() {
        return stdio.await;
    }

    let listener = TcpListener::bind(listen).await?;
    tracing::info!(addr = listen, "Listening for surfaces");

    let res = tokio::select!(
        res = stdio => res,
        res = accept(session, listener) => res,
    );

    return res;
}
