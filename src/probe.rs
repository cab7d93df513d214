//! The interactive probe loop
//!
//! Each menu entry builds a small request, sends it to one notification
//! subject and prints whatever the service replies. Failures are reported and
//! the loop carries on; only Exit or end of input stops it.

use crate::menu::{parse_choice_bytes, write_menu, MenuChoice, MenuError};

use bytes::Bytes;
use notiprobe_client::{
    encode_batch, BusClient, BusError, Notification, NotificationKind, DEFAULT_REQUEST_TIMEOUT,
    LIST, LIST_REQUEST_BODY, SEND_TO_ALL, SEND_TO_CLIENTS,
};
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tracing::{debug, warn};

/// Client ids addressed by the targeted test
pub const TARGET_CLIENTS: [&str; 2] = ["1", "2"];

/// Longest input line kept in memory; anything past it is read and dropped
pub const MAX_LINE_BYTES: u64 = 1024;

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    /// Requests that got a reply
    pub requests_sent: u32,
    /// Operations aborted by a serialization or bus error
    pub requests_failed: u32,
    /// Lines rejected by the menu parser
    pub invalid_inputs: u32,
}

/// Single-element batch for the broadcast test
pub fn broadcast_batch() -> Vec<Notification> {
    vec![Notification::broadcast(
        NotificationKind::Info,
        "Hello World from notiprobe!",
    )]
}

/// Single-element batch for clients 1 and 2
pub fn targeted_batch() -> Vec<Notification> {
    vec![Notification::targeted(
        NotificationKind::Warning,
        "Targeted message from notiprobe!",
        TARGET_CLIENTS,
    )]
}

/// Three broadcasts deliberately out of priority order: info, error, warning
pub fn priority_batch() -> Vec<Notification> {
    [
        NotificationKind::Info,
        NotificationKind::Error,
        NotificationKind::Warning,
    ]
    .into_iter()
    .map(|kind| {
        let message = format!(
            "{} message (priority {})",
            capitalize(kind.as_str()),
            kind.priority()
        );
        Notification::broadcast(kind, message)
    })
    .collect()
}

/// Order the service is expected to deliver `batch` in
///
/// Stable, so equal priorities keep their send order. Nothing here checks that
/// the service actually does this.
pub fn expected_delivery_order(batch: &[Notification]) -> Vec<&Notification> {
    let mut ordered: Vec<&Notification> = batch.iter().collect();
    ordered.sort_by_key(|n| n.kind.priority());
    ordered
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

fn rank_label(index: usize, len: usize) -> &'static str {
    if index == 0 {
        "highest"
    } else if index + 1 == len {
        "lowest"
    } else {
        "medium"
    }
}

/// Interactive test client over any [`BusClient`]
pub struct Probe<B> {
    bus: B,
    request_timeout: Duration,
}

impl<B: BusClient> Probe<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the per-request timeout (5 seconds by default)
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Run the menu loop until Exit or end of input
    ///
    /// Only I/O errors on `input` or `out` end the loop early. The bus is not
    /// closed here; [`run_session`] does that.
    pub async fn run<R, W>(&self, input: &mut R, out: &mut W) -> io::Result<ProbeSummary>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut summary = ProbeSummary::default();
        let mut line = Vec::new();

        loop {
            write_menu(out)?;

            if read_bounded_line(input, &mut line).await? == 0 {
                debug!("End of input, leaving menu loop");
                break;
            }

            let choice = match parse_choice_bytes(&line) {
                Ok(choice) => choice,
                Err(err @ MenuError::InvalidInput) => {
                    // The rest of the line is already consumed
                    summary.invalid_inputs += 1;
                    writeln!(out, "❌ {}", err)?;
                    continue;
                }
                Err(err @ MenuError::OutOfRange(_)) => {
                    summary.invalid_inputs += 1;
                    writeln!(out, "❌ {}", err)?;
                    if !self.pause(input, out).await? {
                        break;
                    }
                    continue;
                }
            };

            debug!(choice = ?choice, "Dispatching menu choice");

            let result = match choice {
                MenuChoice::Broadcast => self.broadcast(out).await?,
                MenuChoice::Targeted => self.targeted(out).await?,
                MenuChoice::PriorityTest => self.priority_test(out).await?,
                MenuChoice::List => self.list(out).await?,
                MenuChoice::Exit => {
                    writeln!(out, "👋 Goodbye!")?;
                    out.flush()?;
                    return Ok(summary);
                }
            };

            match result {
                Ok(()) => summary.requests_sent += 1,
                Err(_) => summary.requests_failed += 1,
            }

            if !self.pause(input, out).await? {
                break;
            }
        }

        out.flush()?;
        Ok(summary)
    }

    /// Send a single info notification to every client
    pub async fn broadcast<W: Write>(&self, out: &mut W) -> io::Result<Result<(), BusError>> {
        writeln!(out, "\n📡 Testing Broadcast Notification...")?;

        let reply = match self
            .send_batch(out, SEND_TO_ALL, &broadcast_batch(), "Sending broadcast notification...")
            .await?
        {
            Ok(reply) => reply,
            Err(e) => return Ok(Err(e)),
        };

        print_reply(out, &reply)?;
        writeln!(out, "💡 Check your WebSocket client to see the message!")?;
        Ok(Ok(()))
    }

    /// Send a single warning to clients 1 and 2 only
    pub async fn targeted<W: Write>(&self, out: &mut W) -> io::Result<Result<(), BusError>> {
        writeln!(out, "\n🎯 Testing Targeted Notification...")?;

        let progress = format!(
            "Sending targeted notification to clients {}...",
            TARGET_CLIENTS.join(" and ")
        );
        let reply = match self
            .send_batch(out, SEND_TO_CLIENTS, &targeted_batch(), &progress)
            .await?
        {
            Ok(reply) => reply,
            Err(e) => return Ok(Err(e)),
        };

        print_reply(out, &reply)?;
        writeln!(
            out,
            "💡 Only WebSocket clients with ID {} should receive this message!",
            TARGET_CLIENTS.join(" or ")
        )?;
        Ok(Ok(()))
    }

    /// Send info, error, warning in one batch and describe the expected order
    pub async fn priority_test<W: Write>(&self, out: &mut W) -> io::Result<Result<(), BusError>> {
        writeln!(out, "\n⚡ Testing Priority Ordering...")?;

        let batch = priority_batch();
        let reply = match self
            .send_batch(out, SEND_TO_ALL, &batch, "Sending multiple notifications...")
            .await?
        {
            Ok(reply) => reply,
            Err(e) => return Ok(Err(e)),
        };

        print_reply(out, &reply)?;
        writeln!(out, "💡 WebSocket clients should receive messages in priority order:")?;
        let ordered = expected_delivery_order(&batch);
        for (i, n) in ordered.iter().enumerate() {
            writeln!(
                out,
                "   {}: {} message ({} priority)",
                ordinal(i + 1),
                capitalize(n.kind.as_str()),
                rank_label(i, ordered.len())
            )?;
        }
        Ok(Ok(()))
    }

    /// Ask the service for its stored notifications
    pub async fn list<W: Write>(&self, out: &mut W) -> io::Result<Result<(), BusError>> {
        writeln!(out, "\n📋 Testing Notification List...")?;
        writeln!(out, "📤 Requesting stored notifications...")?;

        let reply = match self
            .send(out, LIST, Bytes::from_static(LIST_REQUEST_BODY))
            .await?
        {
            Ok(reply) => reply,
            Err(e) => return Ok(Err(e)),
        };

        print_reply(out, &reply)?;
        writeln!(out, "💡 This shows all notifications stored in the database!")?;
        Ok(Ok(()))
    }

    async fn send_batch<W: Write>(
        &self,
        out: &mut W,
        subject: &str,
        batch: &[Notification],
        progress: &str,
    ) -> io::Result<Result<Bytes, BusError>> {
        let body = match encode_batch(batch) {
            Ok(body) => body,
            Err(e) => {
                warn!(subject = %subject, error = %e, "Failed to encode notifications");
                writeln!(out, "❌ Failed to marshal notifications: {}", e)?;
                return Ok(Err(e));
            }
        };

        writeln!(out, "📤 {}", progress)?;
        self.send(out, subject, Bytes::from(body)).await
    }

    async fn send<W: Write>(
        &self,
        out: &mut W,
        subject: &str,
        body: Bytes,
    ) -> io::Result<Result<Bytes, BusError>> {
        out.flush()?;

        match self.bus.request(subject, body, self.request_timeout).await {
            Ok(reply) => Ok(Ok(reply)),
            Err(e) => {
                warn!(subject = %subject, error = %e, "Request failed");
                writeln!(out, "❌ Failed to send request: {}", e)?;
                Ok(Err(e))
            }
        }
    }

    /// Wait for the operator to press Enter; false on end of input
    async fn pause<R, W>(&self, input: &mut R, out: &mut W) -> io::Result<bool>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "\nPress Enter to continue...")?;
        out.flush()?;

        let mut discard = Vec::new();
        Ok(read_bounded_line(input, &mut discard).await? > 0)
    }
}

/// Run the menu loop, then close the bus whatever the loop returned
///
/// A failed close is logged and does not replace the loop's result.
pub async fn run_session<B, R, W>(
    probe: &Probe<B>,
    input: &mut R,
    out: &mut W,
) -> io::Result<ProbeSummary>
where
    B: BusClient,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let result = probe.run(input, out).await;

    if let Err(e) = probe.bus().close().await {
        warn!(error = %e, "Failed to close bus connection");
    }

    result
}

/// Read one line into `buf`, replacing its contents
///
/// At most [`MAX_LINE_BYTES`] are kept. The remainder of a longer line is
/// consumed and dropped, and `buf` is left empty so the line reads as invalid.
/// Returns the number of bytes consumed; 0 means end of input.
async fn read_bounded_line<R>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let mut consumed = (&mut *input)
        .take(MAX_LINE_BYTES)
        .read_until(b'\n', buf)
        .await?;

    if consumed as u64 == MAX_LINE_BYTES && buf.last() != Some(&b'\n') {
        buf.clear();
        let mut overflow = Vec::new();
        loop {
            overflow.clear();
            let n = (&mut *input)
                .take(MAX_LINE_BYTES)
                .read_until(b'\n', &mut overflow)
                .await?;
            consumed += n;
            if n == 0 || overflow.last() == Some(&b'\n') {
                break;
            }
        }
        debug!(bytes = consumed, "Dropped overlong input line");
    }

    Ok(consumed)
}

fn print_reply<W: Write>(out: &mut W, reply: &[u8]) -> io::Result<()> {
    writeln!(out, "✅ Success! Response: {}", String::from_utf8_lossy(reply))
}
