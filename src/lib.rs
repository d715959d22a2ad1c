// src/lib.rs

pub mod video;
pub mod registry;
pub mod storage;
pub mod error;
pub mod api;
pub mod service;
pub mod app_state;
pub mod config;
