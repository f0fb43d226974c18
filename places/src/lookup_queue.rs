use std::collections::BTreeMap;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use shared_types::PlaceSummary;

use crate::error::PlacesError;
use crate::rate_limit::RequestBudget;

#[derive(Debug, Clone, PartialEq)]
pub struct QueueSettings {
    /// Gap between consecutive detail lookups of one batch.
    pub stagger: StdDuration,
    pub budget_capacity: u32,
    pub budget_period: Duration,
}

impl Default for QueueSettings {
    fn default() -> Self {
        Self {
            stagger: StdDuration::from_secs(2),
            budget_capacity: 50,
            budget_period: Duration::hours(24),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// A detail lookup waiting for its delay to elapse.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTask {
    pub id: TaskId,
    pub delay: StdDuration,
    pub place: PlaceSummary,
}

#[derive(Debug)]
pub enum SkipReason {
    /// The task was cancelled, or replaced by a newer batch, before it ran.
    Cancelled,
    Budget(PlacesError),
}

#[derive(Debug, Default)]
pub struct Batch {
    pub tasks: Vec<LookupTask>,
    /// Tasks of the previous batch that will never run.
    pub cancelled: Vec<TaskId>,
}

/// Outcome of issuing a nearby search.
#[derive(Debug)]
pub struct SearchStart {
    /// Lookups of the previous batch, dropped whether or not the search goes ahead.
    pub cancelled: Vec<TaskId>,
    /// Call count after the search took its token, or why it could not.
    pub token: Result<u32, PlacesError>,
}

/// Pending detail lookups plus the shared call budget.
///
/// The queue does not own timers. Callers schedule each task after its
/// `delay`, then call [`LookupQueue::start`] when the timer fires; a task that
/// was cancelled in between is refused there.
#[derive(Debug)]
pub struct LookupQueue {
    settings: QueueSettings,
    budget: RequestBudget,
    pending: BTreeMap<TaskId, PlaceSummary>,
    next_id: u64,
}

impl LookupQueue {
    pub fn new(settings: QueueSettings, now: DateTime<Utc>) -> Self {
        let budget = RequestBudget::new(settings.budget_capacity, settings.budget_period, now);
        Self {
            settings,
            budget,
            pending: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &QueueSettings {
        &self.settings
    }

    pub fn calls_made(&self) -> u32 {
        self.budget.used()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Takes a token for a one-off call such as a nearby search or a geocode.
    pub fn acquire(&mut self, now: DateTime<Utc>) -> Result<u32, PlacesError> {
        self.budget.try_acquire(now)
    }

    /// Issues a nearby search. Pending lookups from the previous search are
    /// cancelled here, before the search result is known.
    pub fn begin_search(&mut self, now: DateTime<Utc>) -> SearchStart {
        SearchStart {
            cancelled: self.cancel_all(),
            token: self.budget.try_acquire(now),
        }
    }

    /// Replaces whatever is pending with detail lookups for `places`, staggered
    /// by their position in the result list.
    pub fn enqueue_batch(&mut self, places: Vec<PlaceSummary>) -> Batch {
        let cancelled = self.cancel_all();
        let tasks = places
            .into_iter()
            .enumerate()
            .map(|(index, place)| {
                let id = TaskId(self.next_id);
                self.next_id += 1;
                self.pending.insert(id, place.clone());
                LookupTask {
                    id,
                    delay: self.settings.stagger * index as u32,
                    place,
                }
            })
            .collect();

        Batch { tasks, cancelled }
    }

    /// Claims a task whose delay has elapsed. The task leaves the queue either way.
    pub fn start(&mut self, id: TaskId, now: DateTime<Utc>) -> Result<PlaceSummary, SkipReason> {
        let place = self.pending.remove(&id).ok_or(SkipReason::Cancelled)?;
        self.budget.try_acquire(now).map_err(SkipReason::Budget)?;
        Ok(place)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn cancel_all(&mut self) -> Vec<TaskId> {
        let ids = self.pending.keys().copied().collect();
        self.pending.clear();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared_types::LatLong;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn place(id: &str) -> PlaceSummary {
        PlaceSummary {
            place_id: id.to_string(),
            name: format!("Restaurant {id}"),
            address: String::new(),
            location: LatLong::new(38.7, -9.1),
            rating: Some(4.0),
            image_url: None,
        }
    }

    #[test]
    fn batch_tasks_are_staggered_by_two_seconds() {
        let mut queue = LookupQueue::new(QueueSettings::default(), now());
        let batch = queue.enqueue_batch(vec![place("a"), place("b"), place("c")]);

        let delays: Vec<_> = batch.tasks.iter().map(|t| t.delay.as_secs()).collect();
        assert_eq!(delays, vec![0, 2, 4]);
        assert!(batch.cancelled.is_empty());
        assert_eq!(queue.pending_len(), 3);
    }

    #[test]
    fn start_consumes_a_token_and_the_task() {
        let mut queue = LookupQueue::new(QueueSettings::default(), now());
        let batch = queue.enqueue_batch(vec![place("a")]);
        let id = batch.tasks[0].id;

        let started = queue.start(id, now()).unwrap();
        assert_eq!(started.place_id, "a");
        assert_eq!(queue.calls_made(), 1);
        assert_eq!(queue.pending_len(), 0);

        assert!(matches!(queue.start(id, now()), Err(SkipReason::Cancelled)));
        assert_eq!(queue.calls_made(), 1);
    }

    #[test]
    fn new_batch_cancels_the_previous_one() {
        let mut queue = LookupQueue::new(QueueSettings::default(), now());
        let first = queue.enqueue_batch(vec![place("a"), place("b")]);
        let second = queue.enqueue_batch(vec![place("c")]);

        let first_ids: Vec<_> = first.tasks.iter().map(|t| t.id).collect();
        assert_eq!(second.cancelled, first_ids);
        assert!(matches!(
            queue.start(first_ids[1], now()),
            Err(SkipReason::Cancelled)
        ));
        assert!(queue.start(second.tasks[0].id, now()).is_ok());
    }

    #[test]
    fn fifty_first_call_is_skipped() {
        let mut queue = LookupQueue::new(QueueSettings::default(), now());
        for _ in 0..49 {
            queue.acquire(now()).unwrap();
        }
        let batch = queue.enqueue_batch(vec![place("a"), place("b")]);

        assert!(queue.start(batch.tasks[0].id, now()).is_ok());
        assert_eq!(queue.calls_made(), 50);

        match queue.start(batch.tasks[1].id, now()) {
            Err(SkipReason::Budget(PlacesError::BudgetExhausted { capacity, .. })) => {
                assert_eq!(capacity, 50)
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(queue.calls_made(), 50);
        assert!(queue.acquire(now()).is_err());
        assert!(queue.acquire(now() + Duration::hours(24)).is_ok());
    }

    #[test]
    fn cancel_all_empties_the_queue() {
        let mut queue = LookupQueue::new(QueueSettings::default(), now());
        let batch = queue.enqueue_batch(vec![place("a"), place("b")]);
        assert!(queue.cancel(batch.tasks[0].id));
        assert!(!queue.cancel(batch.tasks[0].id));
        assert_eq!(queue.cancel_all(), vec![batch.tasks[1].id]);
        assert_eq!(queue.pending_len(), 0);
    }

    #[test]
    fn issuing_a_search_drops_the_pending_batch() {
        let mut queue = LookupQueue::new(QueueSettings::default(), now());
        let batch = queue.enqueue_batch(vec![place("a"), place("b")]);
        let ids: Vec<_> = batch.tasks.iter().map(|t| t.id).collect();

        let search = queue.begin_search(now());
        assert_eq!(search.cancelled, ids);
        assert_eq!(search.token.unwrap(), 1);
        assert_eq!(queue.pending_len(), 0);
        // The old lookups stay dead even if the new search never returns.
        assert!(matches!(queue.start(ids[0], now()), Err(SkipReason::Cancelled)));
        assert_eq!(queue.calls_made(), 1);
    }

    #[test]
    fn search_over_budget_still_drops_the_pending_batch() {
        let settings = QueueSettings {
            budget_capacity: 1,
            ..QueueSettings::default()
        };
        let mut queue = LookupQueue::new(settings, now());
        queue.acquire(now()).unwrap();
        let batch = queue.enqueue_batch(vec![place("a")]);

        let search = queue.begin_search(now());
        assert_eq!(search.cancelled, vec![batch.tasks[0].id]);
        assert!(matches!(
            search.token,
            Err(PlacesError::BudgetExhausted { capacity: 1, .. })
        ));
        assert_eq!(queue.pending_len(), 0);
    }
}
