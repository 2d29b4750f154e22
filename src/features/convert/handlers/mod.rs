pub mod convert_handler;
