pub mod article;
pub mod config;
pub mod view_state;

pub use article::*;
pub use config::*;
pub use view_state::*;
