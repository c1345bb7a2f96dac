//! Pure helpers: dates, slugs, hashing.

pub mod date;
pub mod hash;
pub mod slug;
