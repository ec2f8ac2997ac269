pub mod contract_service;
pub mod schedule;

pub use contract_service::{ContractDetail, ContractService, ContractSummary, CustomerSchedules};
pub use schedule::{derive_schedules, due_date_for};
