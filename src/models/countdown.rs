use serde::Serialize;

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Party start: 2025-12-04 19:30 at UTC-03:00.
pub const PARTY_STARTS_AT_MS: i64 = 1_764_887_400_000;

/// Time left until the party, broken into display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CountdownValue {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownValue {
    /// Floors `target_ms - now_ms` into days/hours/minutes/seconds.
    /// Once `now_ms` reaches the target every field stays at zero.
    pub fn between(target_ms: i64, now_ms: i64) -> Self {
        let distance = target_ms.saturating_sub(now_ms);
        if distance <= 0 {
            return Self::default();
        }

        Self {
            days: (distance / DAY_MS) as u64,
            hours: ((distance % DAY_MS) / HOUR_MS) as u64,
            minutes: ((distance % HOUR_MS) / MINUTE_MS) as u64,
            seconds: ((distance % MINUTE_MS) / SECOND_MS) as u64,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Two-digit display strings in days, hours, minutes, seconds order.
    pub fn padded(&self) -> [String; 4] {
        [
            pad_number(self.days),
            pad_number(self.hours),
            pad_number(self.minutes),
            pad_number(self.seconds),
        ]
    }
}

pub fn pad_number(num: u64) -> String {
    format!("{:02}", num)
}
