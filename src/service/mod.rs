pub mod announcement;
pub mod announcer;
pub mod command_registry;
pub mod discord;
pub mod dispatcher;
pub mod fanout;
pub mod url_watcher;

#[cfg(test)]
pub(crate) mod fake;
