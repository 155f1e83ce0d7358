pub mod allow_list;
pub mod error;
pub mod fixtures;
pub mod gate;
pub mod login;
pub mod session;
pub mod tools;

pub use allow_list::AllowList;
pub use error::{ConfigError, FixtureError};
pub use fixtures::FixtureStore;
pub use gate::{AuthGate, GateOutcome, LoginRequired};
pub use login::{generate_session, LoginUrlBuilder, SessionIssue};
pub use session::{Identity, SessionId, SessionStore};
pub use tools::{ToolSpec, TOOLS};
