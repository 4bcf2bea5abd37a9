//! Extraction warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the HTML tree builder and the sampler to report markup or
//! configuration they had to skip.
//!
//! The channel starts switched off, so library callers get no stderr output
//! and no process-wide state. The `swatch` binary turns it on unless `--quiet`
//! is given.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// While false, warnings are neither printed nor recorded.
static ENABLED: AtomicBool = AtomicBool::new(false);

/// Warn about skipped input (prints once per unique message)
///
/// Returns `true` if the message was printed, which happens only while the
/// channel is enabled and the message is new.
///
/// # Example
/// ```ignore
/// warn_once("HTML", "ignoring end tag </span> with no matching open element");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    if !warnings_enabled() {
        return false;
    }
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        eprintln!("{}", format!("[Swatch {component}] ⚠ {message}").yellow());
    }
    first_time
}

/// Clear all recorded warnings (call before extracting a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Turn warnings on or off. Off is the default; the CLI turns them on unless
/// `--quiet` is given.
pub fn set_warnings_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether [`warn_once`] currently prints anything.
#[must_use]
pub fn warnings_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}
