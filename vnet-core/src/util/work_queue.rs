use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex, PoisonError},
};

/// an entry of a [`WorkQueue`]. `Stop` is pushed once per consumer after the
/// last task and tells the consumer that dequeues it to leave its loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem<T> {
    Task(T),
    Stop,
}

/// unbounded, blocking FIFO shared by a batch of worker threads.
///
/// every pushed item is handed to exactly one caller of [`WorkQueue::get_work`].
#[derive(Debug)]
pub struct WorkQueue<T> {
    items: Mutex<VecDeque<WorkItem<T>>>,
    available: Condvar,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WorkQueue<T> {
    pub fn new() -> WorkQueue<T> {
        WorkQueue {
            items: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    /// appends an item and wakes one waiting consumer.
    pub fn add_work(&self, item: WorkItem<T>) {
        // poisoning leaves the deque intact
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.push_back(item);
        drop(items);
        self.available.notify_one();
    }

    pub fn add_task(&self, task: T) {
        self.add_work(WorkItem::Task(task))
    }

    /// pushes one `Stop` marker per consumer.
    pub fn close(&self, consumers: usize) {
        for _ in 0..consumers {
            self.add_work(WorkItem::Stop);
        }
    }

    /// blocks until an item is available and removes it from the queue.
    pub fn get_work(&self) -> WorkItem<T> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(item) = items.pop_front() {
                return item;
            }
            items = self
                .available
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn len(&self) -> usize {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, thread};

    #[test]
    fn test_fifo_order() {
        let queue = WorkQueue::new();
        queue.add_task(1);
        queue.add_task(2);
        queue.close(1);
        assert_eq!(queue.get_work(), WorkItem::Task(1));
        assert_eq!(queue.get_work(), WorkItem::Task(2));
        assert_eq!(queue.get_work(), WorkItem::Stop);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_every_item_consumed_exactly_once() {
        let workers = 8;
        let tasks = 500;
        let queue: WorkQueue<usize> = WorkQueue::new();

        let consumed: Vec<Vec<usize>> = thread::scope(|s| {
            let handles = (0..workers)
                .map(|_| {
                    s.spawn(|| {
                        let mut seen = vec![];
                        while let WorkItem::Task(t) = queue.get_work() {
                            seen.push(t);
                        }
                        seen
                    })
                })
                .collect::<Vec<_>>();

            // consumers are already blocked on the empty queue at this point
            for t in 0..tasks {
                queue.add_task(t);
            }
            queue.close(workers);

            handles
                .into_iter()
                .map(|h| h.join().expect("worker thread panicked"))
                .collect()
        });

        let total: usize = consumed.iter().map(|c| c.len()).sum();
        assert_eq!(total, tasks);
        let unique: HashSet<usize> = consumed.into_iter().flatten().collect();
        assert_eq!(unique.len(), tasks);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_n_items_n_workers_all_terminate() {
        let n = 4;
        let queue: WorkQueue<usize> = WorkQueue::new();
        for t in 0..n {
            queue.add_task(t);
        }
        queue.close(n);
        let counts: Vec<usize> = thread::scope(|s| {
            let handles = (0..n)
                .map(|_| {
                    s.spawn(|| {
                        let mut count = 0;
                        while let WorkItem::Task(_) = queue.get_work() {
                            count += 1;
                        }
                        count
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().expect("worker thread panicked"))
                .collect()
        });
        assert_eq!(counts.iter().sum::<usize>(), n);
    }
}
