// scheduler.rs
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Fires a job once per calendar day at a fixed local time, by polling
/// the wall clock. The job runs synchronously inside the tick, so two
/// runs can never overlap; a run that overlaps the next day's trigger
/// time delays that trigger to the first poll after it finishes.
pub struct DailySchedule {
    at: NaiveTime,
    poll_interval: Duration,
}

impl DailySchedule {
    pub fn new(at: NaiveTime, poll_interval: Duration) -> Self {
        Self { at, poll_interval }
    }

    /// Blocks forever. The first firing is the next occurrence of the
    /// scheduled time, never the moment the process starts.
    pub fn run_forever<F>(&self, mut job: F) -> !
    where
        F: FnMut(),
    {
        info!("Scheduled daily at {}.", self.at.format("%H:%M"));

        let now = Local::now();
        let mut last_fired: Option<NaiveDate> =
            (now.time() >= self.at).then(|| now.date_naive());

        loop {
            let now = Local::now();
            if should_fire(&now, self.at, last_fired) {
                last_fired = Some(now.date_naive());
                job();
            }
            thread::sleep(self.poll_interval);
        }
    }
}

/// True when `now` has passed the trigger time and the job has not yet
/// fired on `now`'s date.
fn should_fire(now: &DateTime<Local>, at: NaiveTime, last_fired: Option<NaiveDate>) -> bool {
    now.time() >= at && last_fired != Some(now.date_naive())
}
