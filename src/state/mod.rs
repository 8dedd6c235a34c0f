//! Application state module

mod app_state;
mod captcha;
mod forms;

pub use app_state::*;
pub use captcha::*;
pub use forms::*;
