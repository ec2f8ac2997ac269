pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{
    Contract, ContractSchedule, Installment, InstallmentId, InstallmentStatus, PaymentMethod,
    SaleRow,
};
pub use repositories::SaleRepository;
pub use services::{derive_schedules, ContractService};
