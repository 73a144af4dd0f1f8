use shared::domain::RequestSeq;

/// Last-request-wins bookkeeping for engine round trips.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: u64,
    latest: Option<RequestSeq>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestSeq {
        self.next += 1;
        let seq = RequestSeq(self.next);
        self.latest = Some(seq);
        seq
    }

    pub fn latest(&self) -> Option<RequestSeq> {
        self.latest
    }

    pub fn is_latest(&self, seq: RequestSeq) -> bool {
        self.latest == Some(seq)
    }
}
