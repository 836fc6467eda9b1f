pub mod actions;
pub mod auth;
pub mod member;
pub mod pages;
