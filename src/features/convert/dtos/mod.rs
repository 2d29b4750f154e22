mod convert_dto;

pub use convert_dto::{ConvertRequestDto, ConvertResponseDto};
