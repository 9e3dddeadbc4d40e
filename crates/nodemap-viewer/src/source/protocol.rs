use nodemap_core::ApiResponse;

#[derive(Debug, Clone)]
pub struct Incoming {
    pub source: String,
    pub kind: IncomingKind,
}

#[derive(Debug, Clone)]
pub enum IncomingKind {
    Snapshot(ApiResponse),
    Error(String),
}

impl Incoming {
    pub fn snapshot(source: String, resp: ApiResponse) -> Self {
        Self {
            source,
            kind: IncomingKind::Snapshot(resp),
        }
    }

    pub fn error(source: String, msg: String) -> Self {
        Self {
            source,
            kind: IncomingKind::Error(msg),
        }
    }
}
