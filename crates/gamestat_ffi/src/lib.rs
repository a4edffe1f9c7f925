//! FFI surface for the GameStat GUI shell.

pub mod api;
