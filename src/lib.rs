pub mod children;
pub mod core;
pub mod gateway;
pub mod hold;
pub mod utils;
