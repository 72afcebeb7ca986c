//! Frame transports for the session bridge
//!
//! A session reads frames from a [`FrameSource`] and writes them to a
//! [`FrameSink`]. Both `next_frame` implementations here are cancel-safe, so
//! the bridge can race them against a cancellation token.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::mpsc;

use crate::error::{McpError, McpResult};

/// Inbound half of a session
#[async_trait]
pub trait FrameSource: Send {
    /// Next frame, or `None` once the peer has finished sending
    async fn next_frame(&mut self) -> McpResult<Option<String>>;
}

/// Outbound half of a session
#[async_trait]
pub trait FrameSink: Send {
    async fn send_frame(&mut self, frame: String) -> McpResult<()>;

    /// Flush and release the stream
    async fn close(&mut self) -> McpResult<()> {
        Ok(())
    }
}

/// Frames delivered through an mpsc channel
pub struct ChannelSource {
    rx: mpsc::Receiver<String>,
}

impl ChannelSource {
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl FrameSource for ChannelSource {
    async fn next_frame(&mut self) -> McpResult<Option<String>> {
        Ok(self.rx.recv().await)
    }
}

/// Frames pushed into an mpsc channel
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl FrameSink for ChannelSink {
    async fn send_frame(&mut self, frame: String) -> McpResult<()> {
        self.tx
            .send(frame)
            .await
            .map_err(|_| McpError::Transport("outbound stream closed".to_string()))
    }
}

/// Newline-delimited frames read from a byte stream
pub struct LineSource<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> FrameSource for LineSource<R> {
    async fn next_frame(&mut self) -> McpResult<Option<String>> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| McpError::Transport(e.to_string()))?;

            match line {
                Some(line) if line.trim().is_empty() => continue,
                other => return Ok(other),
            }
        }
    }
}

/// Newline-delimited frames written to a byte stream
pub struct LineSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> LineSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> FrameSink for LineSink<W> {
    async fn send_frame(&mut self, frame: String) -> McpResult<()> {
        let mut bytes = frame.into_bytes();
        bytes.push(b'\n');
        self.writer
            .write_all(&bytes)
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| McpError::Transport(e.to_string()))
    }

    async fn close(&mut self) -> McpResult<()> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| McpError::Transport(e.to_string()))
    }
}
