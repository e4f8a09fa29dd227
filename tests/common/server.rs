//! Fake IRC server.
//!
//! The far end of an in-memory duplex stream: the test writes what the
//! server would say and reads what the client sent.

use slirc_client::ConnectionConfig;
use std::time::Duration;
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
};
use tokio::time::timeout;

pub struct TestServer {
    /// Configuration the client connected with.
    pub config: ConnectionConfig,
    lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
    writer: WriteHalf<DuplexStream>,
}

impl TestServer {
    pub fn new(config: ConnectionConfig, stream: DuplexStream) -> Self {
        let (read, writer) = tokio::io::split(stream);
        Self {
            config,
            lines: BufReader::new(read).lines(),
            writer,
        }
    }

    /// Send one line to the client; CRLF is appended.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Next line the client wrote, without CRLF.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        let line = timeout(Duration::from_secs(5), self.lines.next_line())
            .await??
            .ok_or_else(|| anyhow::anyhow!("client closed the stream"))?;
        Ok(line.trim_end_matches('\r').to_string())
    }

    /// Receive `n` lines.
    pub async fn recv_n(&mut self, n: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(n);
        for _ in 0..n {
            lines.push(self.recv().await?);
        }
        Ok(lines)
    }

    /// Skip the six-line registration burst.
    pub async fn skip_registration(&mut self) -> anyhow::Result<()> {
        self.recv_n(6).await.map(|_| ())
    }

    /// Read until the client closes its write side; returns what came before.
    pub async fn recv_until_closed(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            match timeout(Duration::from_secs(5), self.lines.next_line()).await?? {
                Some(line) => lines.push(line.trim_end_matches('\r').to_string()),
                None => return Ok(lines),
            }
        }
    }
}
