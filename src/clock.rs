use chrono::{DateTime, Utc};

/// Time source for timestamp prefixes.
///
/// The formatter reads the current instant through this trait so tests can
/// pin it and assert byte-identical output.
pub trait Clock: Send + Sync {
    /// The current instant. Timezone selection (UTC vs local) happens in the
    /// formatter, not here.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used outside of tests.
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant, for deterministic formatter output in tests.
#[derive(Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
