//! Core types - build context, locales and URL helpers shared by pages.

pub mod context;
pub mod locale;
pub mod url;

pub use context::BuildContext;
pub use locale::{Computed, LocaleConfig, LocaleResolver, Locales};
