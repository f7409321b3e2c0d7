mod credential;
mod guard;
mod policy;
mod refresher;

pub use credential::Credential;
pub use guard::{AccessGuard, AccessGuardResult};
pub use policy::RefreshPolicy;
pub use refresher::TokenRefresher;
