mod caller;
mod session;

pub use caller::{bearer_token, CallerContext};
pub use session::{SessionProvider, StoreSessionProvider};
