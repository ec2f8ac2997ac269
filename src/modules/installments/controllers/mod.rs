pub mod contract_controller;

pub use contract_controller::configure;
