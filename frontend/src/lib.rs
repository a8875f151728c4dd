//! Client-side behaviour for the portfolio page.
//!
//! State lives in plain Rust types driven through [`controller::UiController`];
//! [`web`] is the only module that talks to the browser.

pub mod config;
pub mod contact;
pub mod controller;
pub mod error;
pub mod modal;
pub mod mode;
pub mod page;
pub mod reveal;
pub mod schedule;
pub mod struggle;
pub mod web;
