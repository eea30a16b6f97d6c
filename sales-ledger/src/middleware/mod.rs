pub mod session_lock;

pub use session_lock::{session_lock_middleware, SessionLocks, SESSION_COOKIE_NAME};
