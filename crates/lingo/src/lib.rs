pub mod cache;
pub mod catalog;
pub mod humanize;
pub mod negotiate;
pub mod resolver;
pub mod template;
pub mod types;

pub use cache::{CacheArtifact, CacheError, CacheOutcome, CacheWarning, CatalogCache, ENGINE_FINGERPRINT};
pub use catalog::{Catalog, CatalogLoader, LoadError};
pub use negotiate::{NegotiationSource, Negotiator, SourceSet};
pub use resolver::{InitError, Resolver};
pub use types::{Arg, InvalidLocale, LocaleCode};

/// Creates a `Vec<Arg>` from context values.
///
/// Values are converted via `Into<Arg>`, so plain strings work directly;
/// use [`Arg::message`] for nested message arguments.
///
/// # Example
///
/// ```
/// use lingo::{args, Arg};
///
/// let context = args!["World", Arg::message("USER_TITLE", args!["Alice"])];
/// assert_eq!(context.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    [] => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    [ $($value:expr),+ $(,)? ] => {
        ::std::vec![ $(::std::convert::Into::<$crate::Arg>::into($value)),+ ]
    };
}
