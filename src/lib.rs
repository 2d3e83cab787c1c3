// Library surface for the binary, headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod board;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod logging;
pub mod notice;
pub mod runtime;
pub mod scoring;
pub mod server;
pub mod session;
pub mod ui;
pub mod util;
pub mod word_list;
pub mod word_service;

pub const TICK_RATE_MS: u64 = 100;
