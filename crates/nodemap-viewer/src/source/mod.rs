pub mod file;
pub mod protocol;

pub use file::{spawn_reader, ReaderHandle};
pub use protocol::{Incoming, IncomingKind};
