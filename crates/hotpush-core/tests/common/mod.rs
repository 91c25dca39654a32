pub mod content_server;
