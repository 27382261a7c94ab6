//! Impure effects the converter depends on: fresh identifiers and the clock.
//!
//! Both sit behind small traits so scanning and assembly can run with
//! deterministic stand-ins in tests.

use chrono::Utc;
use uuid::Uuid;

/// Source of unique identifiers for notes, notebooks and copied resources.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs in the uppercase hyphenated form Quiver uses.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string().to_uppercase()
    }
}

/// Source of the current UTC time as unix seconds.
pub trait Clock {
    fn now_unix(&self) -> i64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Counts upwards from `ID-0001`; handy for reproducible output.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        self.next += 1;
        format!("ID-{:04}", self.next)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}
