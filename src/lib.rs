//! Enhancements for a self-introduction page: reformatting of "updated"
//! date stamps and a Malaysia/Singapore switch for the page's display text.

pub mod config;
pub mod date;
pub mod i18n;
pub mod page;
pub mod storage;
pub mod toggle;
