pub mod action;
pub mod journal_page;
