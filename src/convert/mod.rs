pub mod broken_down;
pub mod converter;

pub use broken_down::BrokenDownTime;
pub use converter::{
    epoch_now, split_epoch, subsec_millis, utc_datetime, ConvertError, LocalConverter,
    TimeConverter, UtcConverter,
};
