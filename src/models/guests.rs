use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Upper bound shared by every counter
const MAX_PER_COUNTER: u8 = 20;

/// One of the three headcount counters on the RSVP form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Counter {
    #[serde(rename = "adults")]
    Adults,
    #[serde(rename = "children-0-4")]
    Children0To4,
    #[serde(rename = "children-5-plus")]
    Children5Plus,
}

impl Counter {
    /// Closed `(lower, upper)` bound for this counter.
    pub fn bounds(self) -> (u8, u8) {
        match self {
            Counter::Adults => (1, MAX_PER_COUNTER),
            Counter::Children0To4 | Counter::Children5Plus => (0, MAX_PER_COUNTER),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Counter::Adults => "adults",
            Counter::Children0To4 => "children-0-4",
            Counter::Children5Plus => "children-5-plus",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Counter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adults" => Ok(Counter::Adults),
            "children-0-4" => Ok(Counter::Children0To4),
            "children-5-plus" => Ok(Counter::Children5Plus),
            other => Err(format!("unknown guest counter: {}", other)),
        }
    }
}

/// Headcount for one RSVP. Fields only move through `increment`/`decrement`,
/// so each one stays inside its counter's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuestCounts {
    adults: u8,
    children_0_to_4: u8,
    children_5_plus: u8,
}

impl Default for GuestCounts {
    fn default() -> Self {
        Self {
            adults: 1,
            children_0_to_4: 0,
            children_5_plus: 0,
        }
    }
}

impl GuestCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adults(&self) -> u8 {
        self.adults
    }

    pub fn children_0_to_4(&self) -> u8 {
        self.children_0_to_4
    }

    pub fn children_5_plus(&self) -> u8 {
        self.children_5_plus
    }

    pub fn get(&self, counter: Counter) -> u8 {
        match counter {
            Counter::Adults => self.adults,
            Counter::Children0To4 => self.children_0_to_4,
            Counter::Children5Plus => self.children_5_plus,
        }
    }

    fn slot(&mut self, counter: Counter) -> &mut u8 {
        match counter {
            Counter::Adults => &mut self.adults,
            Counter::Children0To4 => &mut self.children_0_to_4,
            Counter::Children5Plus => &mut self.children_5_plus,
        }
    }

    /// Adds one guest. Returns false when the counter is already at its ceiling.
    pub fn increment(&mut self, counter: Counter) -> bool {
        let (_, upper) = counter.bounds();
        let value = self.slot(counter);
        if *value >= upper {
            return false;
        }
        *value += 1;
        true
    }

    /// Removes one guest. Returns false when the counter is already at its floor.
    pub fn decrement(&mut self, counter: Counter) -> bool {
        let (lower, _) = counter.bounds();
        let value = self.slot(counter);
        if *value <= lower {
            return false;
        }
        *value -= 1;
        true
    }

    pub fn total(&self) -> u32 {
        u32::from(self.adults) + u32::from(self.children_0_to_4) + u32::from(self.children_5_plus)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
