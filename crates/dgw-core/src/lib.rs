pub mod config;
pub mod logging;

pub mod allow_list;
pub mod probe;
pub mod resolver;
pub mod server;
pub mod url_model;
