//! Line buffering for `text/event-stream` bodies.
//!
//! Network chunks do not line up with event boundaries: one chunk may hold
//! several `data:` lines, and one line (or one UTF-8 character) may be split
//! across chunks. Bytes are held until a full line is available.

use std::{collections::VecDeque, mem};

use bytes::Bytes;
use futures::{Stream, StreamExt, stream};
use tracing::error;

use crate::domain::{common::entities::app_errors::CoreError, generation::ports::TextStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Data(String),
    Done,
}

#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` and returns the events of every completed line.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            events.extend(parse_line(&line));
        }
        events
    }

    /// Parses whatever is left once the body has ended.
    pub fn flush(&mut self) -> Vec<SseEvent> {
        let rest = mem::take(&mut self.buffer);
        parse_line(&rest).into_iter().collect()
    }
}

fn parse_line(line: &[u8]) -> Option<SseEvent> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim();

    // Blank separators, `event:`, `id:`, `retry:` and `:` comments carry no text.
    let data = line.strip_prefix("data:")?.trim_start();
    match data {
        "" => None,
        "[DONE]" => Some(SseEvent::Done),
        data => Some(SseEvent::Data(data.to_string())),
    }
}

struct SseState<S, F> {
    body: S,
    parser: SseLineBuffer,
    pending: VecDeque<Result<String, CoreError>>,
    ended: bool,
    parse_data: F,
}

impl<S, F> SseState<S, F>
where
    F: Fn(&str) -> Option<Result<String, CoreError>>,
{
    fn push_events(&mut self, events: Vec<SseEvent>) {
        for event in events {
            match event {
                SseEvent::Data(data) => {
                    if let Some(item) = (self.parse_data)(&data) {
                        self.pending.push_back(item);
                    }
                }
                SseEvent::Done => self.ended = true,
            }
        }
    }
}

/// Turns an SSE byte body into a stream of text fragments.
///
/// `parse_data` maps one `data:` payload to a fragment; `None` skips it.
/// The stream ends after the body ends, after `[DONE]`, or after the first
/// transport error.
pub fn sse_text_stream<S, F>(body: S, parse_data: F) -> TextStream
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send + Unpin + 'static,
    F: Fn(&str) -> Option<Result<String, CoreError>> + Send + 'static,
{
    let state = SseState {
        body,
        parser: SseLineBuffer::new(),
        pending: VecDeque::new(),
        ended: false,
        parse_data,
    };

    let stream = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.ended {
                return None;
            }

            match state.body.next().await {
                Some(Ok(bytes)) => {
                    let events = state.parser.feed(&bytes);
                    state.push_events(events);
                }
                Some(Err(e)) => {
                    error!("Stream read error: {}", e);
                    state.ended = true;
                    return Some((
                        Err(CoreError::Generation(format!("Stream read error: {}", e))),
                        state,
                    ));
                }
                None => {
                    let events = state.parser.flush();
                    state.push_events(events);
                    state.ended = true;
                }
            }
        }
    });

    Box::pin(stream)
}
