pub mod agenda_service;
pub mod forecast_service;
pub mod package_service;
pub mod sale_service;

pub use agenda_service::AgendaService;
pub use forecast_service::ForecastService;
pub use package_service::PackageSaleService;
pub use sale_service::SaleService;
