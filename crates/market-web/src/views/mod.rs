//! Views
//!
//! One component per route.

mod browse;
mod home;
mod login;
mod market;
mod requests;

pub use browse::Browse;
pub use home::Home;
pub use login::Login;
pub use market::{BuySell, LendBorrow};
pub use requests::Requests;
