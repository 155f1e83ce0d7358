pub mod types;
pub mod handler;
pub mod page;

pub use types::{LoginForm, LoginPageQuery};
pub use handler::{handle_generate_session, handle_login, handle_login_page, handle_root_redirect};
