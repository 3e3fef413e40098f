mod upload_dto;

pub use upload_dto::{
    get_extension_from_content_type, is_image_type_allowed, UploadImagesDto,
    UploadedImagesResponseDto, ALLOWED_IMAGE_TYPES, MAX_IMAGE_SIZE,
};
