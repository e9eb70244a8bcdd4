use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Queued,
    Processing,
    Done,
    Failed,
}

/// Progress counts for a queue, suitable for a status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub queued: usize,
    pub processing: usize,
    pub done: usize,
    pub failed: usize,
}

/// Strictly sequential task queue: at most one item processing at a
/// time, caller-driven (no threads, no delays). Used for document
/// rejections, where each item triggers one service round-trip.
pub struct TaskQueue<T> {
    tasks: Vec<(T, TaskState)>,
    in_flight: Option<usize>,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            in_flight: None,
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.tasks.push((item, TaskState::Queued));
    }

    /// Start the next queued task. Returns `None` while a task is
    /// already processing or when nothing is queued.
    pub fn begin_next(&mut self) -> Option<&T> {
        if self.in_flight.is_some() {
            return None;
        }
        let next = self
            .tasks
            .iter()
            .position(|(_, state)| *state == TaskState::Queued)?;
        self.tasks[next].1 = TaskState::Processing;
        self.in_flight = Some(next);
        Some(&self.tasks[next].0)
    }

    /// Resolve the in-flight task.
    pub fn complete(&mut self, ok: bool) -> Result<(), crate::SessionError> {
        let index = self.in_flight.take().ok_or(crate::SessionError::QueueIdle)?;
        self.tasks[index].1 = if ok { TaskState::Done } else { TaskState::Failed };
        Ok(())
    }

    pub fn in_flight(&self) -> Option<&T> {
        self.in_flight.map(|i| &self.tasks[i].0)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
            && !self
                .tasks
                .iter()
                .any(|(_, state)| *state == TaskState::Queued)
    }

    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();
        for (_, state) in &self.tasks {
            match state {
                TaskState::Queued => progress.queued += 1,
                TaskState::Processing => progress.processing += 1,
                TaskState::Done => progress.done += 1,
                TaskState::Failed => progress.failed += 1,
            }
        }
        progress
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
