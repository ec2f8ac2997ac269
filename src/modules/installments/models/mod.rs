pub mod installment;
pub mod sale_row;

pub use installment::{Contract, ContractSchedule, Installment, InstallmentId, InstallmentStatus};
pub use sale_row::{PaymentMethod, SaleRow, PAID_MARKER_CODE};
