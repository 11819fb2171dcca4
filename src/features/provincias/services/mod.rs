mod provincia_service;

pub use provincia_service::ProvinciaService;
