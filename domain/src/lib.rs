pub mod catalog;
pub mod conversation;
