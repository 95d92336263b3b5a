pub mod controller;
pub mod cookie;
pub mod model;
pub mod router;
pub mod service;
pub mod sweeper;
