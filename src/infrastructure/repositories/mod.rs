// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_company_repository;

pub use postgres_company_repository::PostgresCompanyRepository;
