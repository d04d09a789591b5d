mod bootstrap;
mod commands;
mod config;
mod session;

pub(crate) use bootstrap::run;
