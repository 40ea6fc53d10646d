use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var_os("POOL_DASH_QUOTE_STATS").is_some())
}

#[derive(Debug, Clone, Copy)]
pub struct QuoteStatsSnapshot {
    pub requests_issued: u64,
    pub requests_dispatched: u64,
    pub requests_coalesced: u64,
    pub stale_dropped: u64,
    pub failures: u64,
}

static REQUESTS_ISSUED: AtomicU64 = AtomicU64::new(0);
static REQUESTS_DISPATCHED: AtomicU64 = AtomicU64::new(0);
static REQUESTS_COALESCED: AtomicU64 = AtomicU64::new(0);
static STALE_DROPPED: AtomicU64 = AtomicU64::new(0);
static FAILURES: AtomicU64 = AtomicU64::new(0);

pub fn reset() {
    REQUESTS_ISSUED.store(0, Ordering::Relaxed);
    REQUESTS_DISPATCHED.store(0, Ordering::Relaxed);
    REQUESTS_COALESCED.store(0, Ordering::Relaxed);
    STALE_DROPPED.store(0, Ordering::Relaxed);
    FAILURES.store(0, Ordering::Relaxed);
}

pub fn snapshot_if_enabled() -> Option<QuoteStatsSnapshot> {
    if !enabled() {
        return None;
    }
    Some(QuoteStatsSnapshot {
        requests_issued: REQUESTS_ISSUED.load(Ordering::Relaxed),
        requests_dispatched: REQUESTS_DISPATCHED.load(Ordering::Relaxed),
        requests_coalesced: REQUESTS_COALESCED.load(Ordering::Relaxed),
        stale_dropped: STALE_DROPPED.load(Ordering::Relaxed),
        failures: FAILURES.load(Ordering::Relaxed),
    })
}

#[inline]
pub(crate) fn inc_requests_issued() {
    if enabled() {
        REQUESTS_ISSUED.fetch_add(1, Ordering::Relaxed);
    }
}

#[inline]
pub(crate) fn inc_requests_dispatched() {
    if enabled() {
        REQUESTS_DISPATCHED.fetch_add(1, Ordering::Relaxed);
    }
}

#[inline]
pub(crate) fn inc_requests_coalesced() {
    if enabled() {
        REQUESTS_COALESCED.fetch_add(1, Ordering::Relaxed);
    }
}

#[inline]
pub(crate) fn inc_stale_dropped() {
    if enabled() {
        STALE_DROPPED.fetch_add(1, Ordering::Relaxed);
    }
}

#[inline]
pub(crate) fn inc_failures() {
    if enabled() {
        FAILURES.fetch_add(1, Ordering::Relaxed);
    }
}
