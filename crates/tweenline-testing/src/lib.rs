//! Testing utilities and harness for Tweenline

pub mod logs;
pub mod probe;
pub mod recorder;
pub mod testing;

pub use logs::{capture_logs, warnings, CapturedRecord};
pub use probe::{Event, EventLog, ProbeOperation};
pub use recorder::RecordedValue;
pub use testing::*;

pub mod prelude {
    pub use crate::logs::{capture_logs, warnings, CapturedRecord};
    pub use crate::probe::{Event, EventLog, ProbeOperation};
    pub use crate::recorder::RecordedValue;
    pub use crate::testing::*;
}
