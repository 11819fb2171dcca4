mod stakeholder_dto;

pub use stakeholder_dto::{
    AssignTagsDto, ExportSelectionDto, StakeholderExportRowDto, StakeholderQueryParams,
    StakeholderRequestDto, StakeholderResponseDto,
};
