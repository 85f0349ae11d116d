//! Thread-local capture of `log` records, for asserting on diagnostics.
//!
//! [`capture_logs`] installs a process-wide logger on first use. It cannot
//! share a test binary with `env_logger`, since only one logger may be set.

use std::cell::RefCell;
use std::sync::OnceLock;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl CapturedRecord {
    pub fn contains(&self, needle: &str) -> bool {
        self.message.contains(needle)
    }
}

thread_local! {
    static CAPTURED: RefCell<Option<Vec<CapturedRecord>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALLED: OnceLock<bool> = OnceLock::new();

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        CAPTURED.with(|captured| captured.borrow().is_some())
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let captured = CapturedRecord {
            level: record.level(),
            target: record.target().to_owned(),
            message: record.args().to_string(),
        };
        CAPTURED.with(|slot| {
            if let Some(records) = slot.borrow_mut().as_mut() {
                records.push(captured);
            }
        });
    }

    fn flush(&self) {}
}

fn install() -> bool {
    *INSTALLED.get_or_init(|| {
        let installed = log::set_logger(&LOGGER).is_ok();
        if installed {
            log::set_max_level(LevelFilter::Trace);
        }
        installed
    })
}

/// Run `f` and return its result along with every record logged on this
/// thread while it ran.
///
/// Panics if another logger was installed first.
#[track_caller]
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedRecord>) {
    assert!(
        install(),
        "capture_logs needs the global logger; another one is already installed"
    );
    let previous = CAPTURED.with(|slot| slot.borrow_mut().replace(Vec::new()));
    let result = f();
    let records = CAPTURED.with(|slot| std::mem::replace(&mut *slot.borrow_mut(), previous));
    (result, records.unwrap_or_default())
}

/// Records at `Warn` or above.
pub fn warnings(records: &[CapturedRecord]) -> Vec<&CapturedRecord> {
    records
        .iter()
        .filter(|record| record.level <= Level::Warn)
        .collect()
}
