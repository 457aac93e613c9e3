use std::collections::VecDeque;

/// A decoded-token source. One decode event yields exactly one text value or
/// one error string; `None` means the scanner is closed. How the QR image
/// becomes text is not this crate's business.
pub trait TokenDecoder {
    fn next_scan(&mut self) -> Option<Result<String, String>>;
}

/// Replays a fixed queue of decode outcomes. Backs one-shot captures and
/// tests.
#[derive(Debug, Default)]
pub struct QueuedDecoder {
    queue: VecDeque<Result<String, String>>,
}

impl QueuedDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&mut self, raw: impl Into<String>) -> &mut Self {
        self.queue.push_back(Ok(raw.into()));
        self
    }

    pub fn push_err(&mut self, message: impl Into<String>) -> &mut Self {
        self.queue.push_back(Err(message.into()));
        self
    }
}

impl TokenDecoder for QueuedDecoder {
    fn next_scan(&mut self) -> Option<Result<String, String>> {
        self.queue.pop_front()
    }
}
