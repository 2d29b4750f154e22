mod image_dto;

pub use image_dto::{GenerateImageRequestDto, GenerateImageResponseDto, ImagePayloadDto};
