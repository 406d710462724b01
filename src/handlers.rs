pub mod appointments;
pub mod dashboard;
pub mod package_sales;
pub mod sales;
