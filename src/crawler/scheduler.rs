//! Scheduler for the ordered work queue
//!
//! This module handles:
//! - Seeding one page task per configured URL
//! - Strict first-in first-out draining
//! - Placing a page's link tasks ahead of the remaining queue

use crate::state::Attempt;
use std::collections::VecDeque;
use url::Url;

/// A unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Verify a configured page
    Page { url: String },

    /// Verify a link discovered on `page`
    Link {
        url: Url,
        page: String,
        attempt: Attempt,
    },
}

impl Task {
    /// Creates a first-attempt link task
    pub fn link(url: Url, page: &str) -> Self {
        Task::Link {
            url,
            page: page.to_string(),
            attempt: Attempt::First,
        }
    }

    /// Creates the GET retry for a link
    pub fn retry(url: Url, page: &str) -> Self {
        Task::Link {
            url,
            page: page.to_string(),
            attempt: Attempt::Retry,
        }
    }

    /// Returns the URL or link this task verifies
    pub fn target(&self) -> &str {
        match self {
            Task::Page { url } => url,
            Task::Link { url, .. } => url.as_str(),
        }
    }
}

/// Ordered work queue
///
/// Tasks are processed one at a time. Follow-up tasks from a completed task
/// go to the front, so a page's links finish before the next page starts.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: VecDeque<Task>,
}

impl Scheduler {
    /// Creates a scheduler seeded with one page task per URL, in order
    pub fn new(page_urls: &[String]) -> Self {
        Self {
            queue: page_urls
                .iter()
                .map(|url| Task::Page { url: url.clone() })
                .collect(),
        }
    }

    /// Takes the next task
    ///
    /// # Returns
    ///
    /// * `Some(Task)` - The task at the front of the queue
    /// * `None` - The queue is drained
    pub fn next_task(&mut self) -> Option<Task> {
        self.queue.pop_front()
    }

    /// Inserts tasks at the front of the queue, keeping their order
    pub fn push_front_all(&mut self, tasks: Vec<Task>) {
        for task in tasks.into_iter().rev() {
            self.queue.push_front(task);
        }
    }

    /// Number of queued tasks
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
