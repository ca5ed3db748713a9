use super::task::{TaskId, TaskStatus};

/// Emitted once per status transition during a batch conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressEvent {
    pub task_id: TaskId,
    pub status: TaskStatus,
    /// tasks that reached a terminal state so far
    pub completed: usize,
    pub total: usize,
}

impl ProgressEvent {
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0_f32;
        }
        self.completed as f32 / self.total as f32 * 100_f32
    }
}

pub trait ProgressListener {
    fn on_progress(&mut self, event: &ProgressEvent);
}

impl<F: FnMut(&ProgressEvent)> ProgressListener for F {
    fn on_progress(&mut self, event: &ProgressEvent) {
        self(event)
    }
}

#[cfg(test)]
mod test {
    use super::{ProgressEvent, ProgressListener};
    use crate::image::task::{TaskId, TaskStatus};

    fn event(completed: usize, total: usize) -> ProgressEvent {
        ProgressEvent {
            task_id: TaskId(0),
            status: TaskStatus::Completed,
            completed,
            total,
        }
    }

    #[test]
    fn percent_of_completed_tasks() {
        assert_eq!(event(1, 4).percent(), 25_f32);
        assert_eq!(event(4, 4).percent(), 100_f32);
        assert_eq!(event(0, 0).percent(), 0_f32);
    }

    #[test]
    fn closures_receive_events() {
        let mut received = Vec::new();
        let mut listener = |event: &ProgressEvent| received.push(event.completed);
        listener.on_progress(&event(1, 2));
        listener.on_progress(&event(2, 2));
        assert_eq!(received, vec![1, 2]);
    }
}
