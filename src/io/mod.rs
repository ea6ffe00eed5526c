pub mod articles_io;
pub mod config_io;
pub mod kv;
pub mod state;
