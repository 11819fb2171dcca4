mod export_dto;
mod provincia_dto;

pub use export_dto::{ExportedProvinciaDto, ExportedStakeholderDto, ProvinciaDocumentDto};
pub use provincia_dto::{ProvinciaRequestDto, ProvinciaResponseDto};
