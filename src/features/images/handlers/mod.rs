pub mod image_handler;
