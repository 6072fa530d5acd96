//! Value types shared across the engine.

mod arg;
mod locale_code;

pub use arg::Arg;
pub use locale_code::{InvalidLocale, LocaleCode};
