// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::income_forecast,

        // --- Sales ---
        handlers::sales::create_sale,
        handlers::sales::list_sales,
        handlers::sales::get_sale,

        // --- Packages ---
        handlers::package_sales::create_package_sale,
        handlers::package_sales::list_package_sales,

        // --- Appointments ---
        handlers::appointments::create_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::cancel_appointment,
    ),
    components(
        schemas(
            // --- Forecast ---
            models::forecast::ForecastPeriod,
            models::forecast::ObligationKind,
            models::forecast::Obligation,
            models::forecast::SummaryEntry,
            models::forecast::ForecastSummary,
            models::forecast::ForecastAlerts,
            models::forecast::ForecastReport,

            // --- Agenda ---
            models::agenda::AppointmentKind,
            models::agenda::AppointmentStatus,
            models::agenda::Appointment,
            models::agenda::AppointmentDetail,

            // --- Pacotes ---
            models::packages::PackageSaleStatus,
            models::packages::PackageSale,

            // --- Vendas ---
            models::sales::SaleKind,
            models::sales::PaymentMethod,
            models::sales::PaymentStatus,
            models::sales::InstallmentStatus,
            models::sales::Sale,
            models::sales::Installment,
            models::sales::SaleItem,
            models::sales::SaleDetail,

            // --- Payloads ---
            handlers::dashboard::ForecastQuery,
            handlers::sales::CreateSalePayload,
            handlers::package_sales::CreatePackageSalePayload,
            handlers::appointments::CreateAppointmentPayload,
        )
    ),
    tags(
        (name = "Dashboard", description = "Previsão de entrada e alertas de recebíveis"),
        (name = "Sales", description = "Vendas e cronograma de parcelas"),
        (name = "Packages", description = "Vendas de pacote para eventos"),
        (name = "Appointments", description = "Agenda de atendimentos")
    )
)]
pub struct ApiDoc;
