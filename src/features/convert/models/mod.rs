mod conversion;

pub use conversion::{ConversionOutcome, ConversionResult, ConversionStyle, UsedStrategy};
