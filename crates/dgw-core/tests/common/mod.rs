pub mod head_server;
