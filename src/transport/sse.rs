//! Server-sent event framing for streamed responses.

use bytes::Bytes;
use futures::{stream, StreamExt};
use tracing::debug;

use crate::BoxStream;

const FRAME_DELIMITER: &[u8] = b"\n\n";
const DATA_PREFIX: &str = "data:";
const DONE_SIGNAL: &str = "[DONE]";

enum Payload {
    Data(String),
    Skip,
    Done,
}

/// Split a byte stream into SSE data payloads.
///
/// Frames are delimited by a blank line; the `data:` field prefix is
/// stripped, comment lines are skipped, and the `[DONE]` sentinel ends the
/// stream. Transport errors pass through as stream elements. A trailing
/// frame without its delimiter is flushed once at EOF.
///
/// The buffer holds raw bytes and only complete frames are converted to
/// text, so a multibyte character split across chunk boundaries reassembles
/// intact.
pub(crate) fn frame_stream(input: BoxStream<'static, Bytes>) -> BoxStream<'static, String> {
    // Fused so the flush path may poll again after the source ends.
    let frames = stream::unfold((input.fuse(), Vec::new()), |(mut input, mut buf)| async move {
        loop {
            // Emit any full frame already buffered.
            if let Some(idx) = delimiter_position(&buf) {
                let frame = String::from_utf8_lossy(&buf[..idx]).into_owned();
                buf.drain(..idx + FRAME_DELIMITER.len());
                match payload(&frame) {
                    Payload::Data(data) => return Some((Ok(data), (input, buf))),
                    Payload::Skip => continue,
                    Payload::Done => {
                        debug!("event stream closed");
                        return None;
                    }
                }
            }

            match input.next().await {
                Some(Ok(bytes)) => buf.extend_from_slice(&bytes),
                Some(Err(err)) => return Some((Err(err), (input, buf))),
                None => {
                    let flushed = std::mem::take(&mut buf);
                    let frame = String::from_utf8_lossy(&flushed);
                    return match payload(&frame) {
                        Payload::Data(data) => Some((Ok(data), (input, buf))),
                        _ => {
                            debug!("event stream closed");
                            None
                        }
                    };
                }
            }
        }
    });
    Box::pin(frames)
}

fn delimiter_position(buf: &[u8]) -> Option<usize> {
    buf.windows(FRAME_DELIMITER.len())
        .position(|window| window == FRAME_DELIMITER)
}

fn payload(frame: &str) -> Payload {
    let trimmed = frame.trim();
    // Blank frames and SSE comment lines carry nothing.
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return Payload::Skip;
    }
    let data = match trimmed.strip_prefix(DATA_PREFIX) {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    };
    if data == DONE_SIGNAL {
        Payload::Done
    } else {
        Payload::Data(data.to_owned())
    }
}
