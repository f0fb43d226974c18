use chrono::Utc;
use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use places::{LookupQueue, LookupTask, QueueSettings, SkipReason, TaskId};
use shared_types::{LatLong, PlaceSummary};

use crate::server::{nearby_restaurants, place_reviews};
use crate::store::RestaurantRepository;

/// Background fill of the store from nearby places.
///
/// Every external call takes a token from the shared [`LookupQueue`] budget.
/// Detail lookups are timer-driven and the timers are cleared by
/// [`LookupRunner::cancel_all`], which the Map Host calls on unmount.
#[derive(Clone, Copy)]
pub struct LookupRunner {
    queue: StoredValue<LookupQueue>,
    timers: StoredValue<Vec<(TaskId, TimeoutHandle)>>,
    repository: RestaurantRepository,
}

impl LookupRunner {
    pub fn new(repository: RestaurantRepository) -> Self {
        Self {
            queue: StoredValue::new(LookupQueue::new(QueueSettings::default(), Utc::now())),
            timers: StoredValue::new(Vec::new()),
            repository,
        }
    }

    /// Takes a token for a single external call, logging when the budget is spent.
    pub fn acquire(&self, call: &str) -> bool {
        match self.queue.try_update_value(|queue| queue.acquire(Utc::now())) {
            Some(Ok(count)) => {
                log!("Request counter: {}", count);
                true
            }
            Some(Err(e)) => {
                log!("Maximum number of requests reached, skipping {}: {}", call, e);
                false
            }
            None => false,
        }
    }

    /// Nearby search around `center`, then one staggered details lookup per hit.
    /// Lookups still pending from the previous search are dropped up front.
    pub fn search_around(&self, center: LatLong) {
        let Some(search) = self
            .queue
            .try_update_value(|queue| queue.begin_search(Utc::now()))
        else {
            return;
        };

        if !search.cancelled.is_empty() {
            log!("Dropped {} lookups from the previous search", search.cancelled.len());
        }
        self.clear_timers(&search.cancelled);

        match search.token {
            Ok(count) => log!("Request counter: {}", count),
            Err(e) => {
                log!("Maximum number of requests reached, skipping nearby search: {}", e);
                return;
            }
        }

        let runner = *self;
        spawn_local(async move {
            match nearby_restaurants(center).await {
                Ok(places) => {
                    log!("Nearby search found {} places", places.len());
                    runner.schedule(places);
                }
                Err(e) => error!("Nearby search failed: {}", e),
            }
        });
    }

    fn schedule(&self, places: Vec<PlaceSummary>) {
        let Some(batch) = self
            .queue
            .try_update_value(|queue| queue.enqueue_batch(places))
        else {
            return;
        };

        self.clear_timers(&batch.cancelled);

        for task in batch.tasks {
            self.schedule_task(task);
        }
    }

    fn schedule_task(&self, task: LookupTask) {
        let runner = *self;
        let id = task.id;
        match set_timeout_with_handle(move || runner.run(id), task.delay) {
            Ok(handle) => {
                self.timers.update_value(|timers| timers.push((id, handle)));
            }
            Err(e) => {
                error!("Failed to schedule lookup for {}: {:?}", task.place.name, e);
                self.queue.update_value(|queue| {
                    queue.cancel(id);
                });
            }
        }
    }

    fn run(&self, id: TaskId) {
        self.timers
            .try_update_value(|timers| timers.retain(|(task, _)| *task != id));

        let started = self
            .queue
            .try_update_value(|queue| queue.start(id, Utc::now()));

        let place = match started {
            Some(Ok(place)) => place,
            Some(Err(SkipReason::Budget(e))) => {
                log!("Maximum number of requests reached: {}", e);
                return;
            }
            Some(Err(SkipReason::Cancelled)) | None => return,
        };

        let repository = self.repository;
        spawn_local(async move {
            match place_reviews(place.place_id.clone()).await {
                Ok(reviews) => repository.append(place.into_restaurant(reviews)),
                Err(e) => error!("Place details failed for {}: {}", place.name, e),
            }
        });
    }

    fn clear_timers(&self, ids: &[TaskId]) {
        self.timers.try_update_value(|timers| {
            timers.retain(|(id, handle)| {
                if ids.contains(id) {
                    handle.clear();
                    false
                } else {
                    true
                }
            })
        });
    }

    /// Stops every pending lookup. Safe to call after the owner is gone.
    pub fn cancel_all(&self) {
        let Some(cancelled) = self.queue.try_update_value(LookupQueue::cancel_all) else {
            return;
        };
        if !cancelled.is_empty() {
            warn!("Cancelled {} pending restaurant lookups", cancelled.len());
        }
        self.clear_timers(&cancelled);
    }
}
