//! Panic capture for the finalization boundary.
//!
//! `catch_unwind` hands back only the payload. The message location and a
//! backtrace are only available inside the panic hook, so a process-wide hook
//! stores them in a thread-local slot while a [`CaptureScope`] is alive on
//! that thread. Threads without a scope fall through to the previous hook.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::panic::{self, PanicHookInfo};
use std::sync::Once;

static INSTALL_HOOK: Once = Once::new();

thread_local! {
    static ARMED: Cell<usize> = const { Cell::new(0) };
    static CAPTURED: RefCell<Option<PanicReport>> = const { RefCell::new(None) };
}

/// What is known about a panic raised by check code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicReport {
    pub message: String,
    /// `file:line:column` of the panic, when the hook saw it.
    pub location: Option<String>,
    pub backtrace: String,
}

impl PanicReport {
    /// Builds a report from a `catch_unwind` payload alone.
    #[must_use]
    pub fn from_payload(payload: &(dyn Any + Send)) -> Self {
        Self {
            message: payload_message(payload),
            location: None,
            backtrace: String::from("<backtrace not captured>"),
        }
    }

    fn from_hook(info: &PanicHookInfo<'_>) -> Self {
        Self {
            message: payload_message(info.payload()),
            location: info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
            backtrace: Backtrace::force_capture().to_string(),
        }
    }
}

fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("Box<dyn Any>")
    }
}

/// Keeps panic capture active on the current thread while alive.
///
/// Not `Send`: the capture slot is per thread.
pub(crate) struct CaptureScope {
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for CaptureScope {
    fn drop(&mut self) {
        ARMED.with(|armed| armed.set(armed.get().saturating_sub(1)));
    }
}

/// Installs the hook (once per process) and arms capture on this thread.
pub(crate) fn arm() -> CaptureScope {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let armed = ARMED.try_with(Cell::get).unwrap_or(0) > 0;
            if !armed {
                previous(info);
                return;
            }
            let report = PanicReport::from_hook(info);
            // The slot is unavailable during thread teardown; the payload
            // fallback in `recover` covers that case.
            let _ = CAPTURED.try_with(|slot| {
                if let Ok(mut slot) = slot.try_borrow_mut() {
                    *slot = Some(report);
                }
            });
        }));
    });

    ARMED.with(|armed| armed.set(armed.get() + 1));
    CAPTURED.with(|slot| *slot.borrow_mut() = None);
    CaptureScope {
        _thread_bound: PhantomData,
    }
}

/// Takes the report the hook captured on this thread, if any.
pub(crate) fn take_captured() -> Option<PanicReport> {
    CAPTURED
        .try_with(|slot| slot.try_borrow_mut().ok().and_then(|mut s| s.take()))
        .ok()
        .flatten()
}

/// Turns a `catch_unwind` payload into a report, preferring what the hook
/// captured.
pub(crate) fn recover(payload: Box<dyn Any + Send>) -> PanicReport {
    take_captured().unwrap_or_else(|| PanicReport::from_payload(payload.as_ref()))
}

#[cfg(test)]
#[path = "panic_capture_tests.rs"]
mod tests;
