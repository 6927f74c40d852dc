mod banner;
mod control;

pub use banner::{BANNER_TIMEOUT, ErrorBanner};
pub use control::{ActionControl, ControlState, RESTORE_DELAY};
