pub mod quickpay;
