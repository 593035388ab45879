pub mod action_target;
pub mod activity;
pub mod draft;
pub mod position;
pub mod submission;
