pub mod agenda;
pub mod forecast;
pub mod packages;
pub mod sales;
