pub mod notify;
pub mod payment_status;
