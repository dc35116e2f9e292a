pub mod errors;
pub mod gateway;
pub mod value_objects;
