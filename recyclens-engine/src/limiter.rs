use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use recyclens_core::RateLimitConfig;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_time: DateTime<Utc>,
}

struct WindowEntry {
    count: u32,
    window_end: Instant,
}

/// Per-client request limiter over a fixed window. Check-and-increment runs
/// under one lock acquisition, so concurrent requests for the same client
/// cannot double-count or slip past the ceiling.
pub struct RateLimiter {
    config: RateLimitConfig,
    clients: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the decision for one request. A denied check consumes no
    /// slot; only allowed requests increment the counter.
    pub fn check(&self, client_id: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut clients = self.clients.lock();

        if clients
            .get(client_id)
            .map_or(false, |entry| entry.window_end <= now)
        {
            clients.remove(client_id);
        }

        let entry = clients.entry(client_id.to_string()).or_insert(WindowEntry {
            count: 0,
            window_end: now + Duration::from_millis(self.config.window_ms),
        });

        let allowed = entry.count < self.config.max_requests;
        let remaining = self.config.max_requests.saturating_sub(entry.count);
        let reset_time = Utc::now()
            + ChronoDuration::milliseconds(
                entry.window_end.saturating_duration_since(now).as_millis() as i64,
            );

        if allowed {
            entry.count += 1;
        }

        RateLimitDecision {
            allowed,
            remaining,
            reset_time,
        }
    }

    pub fn reset(&self, client_id: &str) {
        self.clients.lock().remove(client_id);
    }

    pub fn active_clients(&self) -> usize {
        self.clients.lock().len()
    }

    /// Drop expired windows so idle clients do not accumulate.
    pub fn sweep(&self) {
        let now = Instant::now();
        self.clients.lock().retain(|_, entry| entry.window_end > now);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DailyQuotaDecision {
    pub allowed: bool,
    pub used: u32,
    pub remaining: u32,
    pub reset_time: DateTime<Utc>,
}

struct DailyEntry {
    count: u32,
    date: NaiveDate,
}

/// Calendar-day usage counter per client, reset at local midnight. State is
/// process-lifetime only.
pub struct DailyQuota {
    limit: u32,
    clients: Mutex<HashMap<String, DailyEntry>>,
}

impl DailyQuota {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn check(&self, client_id: &str) -> DailyQuotaDecision {
        let today = Local::now().date_naive();
        let mut clients = self.clients.lock();

        if clients
            .get(client_id)
            .map_or(false, |entry| entry.date != today)
        {
            clients.remove(client_id);
        }

        let entry = clients.entry(client_id.to_string()).or_insert(DailyEntry {
            count: 0,
            date: today,
        });

        let allowed = entry.count < self.limit;
        let remaining = self.limit.saturating_sub(entry.count);

        if allowed {
            entry.count += 1;
        }

        DailyQuotaDecision {
            allowed,
            used: entry.count,
            remaining,
            reset_time: next_local_midnight(),
        }
    }

    pub fn active_clients(&self) -> usize {
        self.clients.lock().len()
    }

    /// Drop counters from previous days.
    pub fn sweep(&self) {
        let today = Local::now().date_naive();
        self.clients.lock().retain(|_, entry| entry.date == today);
    }
}

fn next_local_midnight() -> DateTime<Utc> {
    let fallback = Utc::now() + ChronoDuration::days(1);
    let Some(tomorrow) = Local::now().date_naive().succ_opt() else {
        return fallback;
    };
    let Some(midnight) = tomorrow.and_hms_opt(0, 0, 0) else {
        return fallback;
    };
    match Local.from_local_datetime(&midnight).single() {
        Some(local) => local.with_timezone(&Utc),
        None => fallback,
    }
}
