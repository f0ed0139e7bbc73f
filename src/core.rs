pub mod command;
pub mod controller;
pub mod domain;
pub mod events;
pub mod pool;
pub mod repository;
pub mod settings;
