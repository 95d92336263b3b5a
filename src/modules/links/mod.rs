pub mod controller;
pub mod enricher;
pub mod model;
pub mod router;
pub mod service;
