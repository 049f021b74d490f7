pub mod clock;
pub mod request_store;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use request_store::RequestStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
