pub mod operation_types;
pub mod payment_states;
pub mod payment_statuses;
