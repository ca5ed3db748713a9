use std::fmt::Display;

use super::TargetFormat;
use crate::blob::BlobHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub(crate) u64);

impl Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Converting,
    Completed,
    Failed,
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Converting => write!(f, "converting"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// An uploaded file: its name and raw content.
#[derive(Clone, Debug)]
pub struct SourceFile {
    name: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertedImage {
    handle: BlobHandle,
    format: TargetFormat,
}

impl ConvertedImage {
    pub fn handle(&self) -> &BlobHandle {
        &self.handle
    }

    pub fn format(&self) -> TargetFormat {
        self.format
    }
}

pub struct ImageTask {
    id: TaskId,
    source: SourceFile,
    mime_type: &'static str,
    preview: BlobHandle,
    status: TaskStatus,
    output: Option<ConvertedImage>,
    failure: Option<String>,
}

impl ImageTask {
    pub(crate) fn new(
        id: TaskId,
        source: SourceFile,
        mime_type: &'static str,
        preview: BlobHandle,
    ) -> Self {
        Self {
            id,
            source,
            mime_type,
            preview,
            status: TaskStatus::Pending,
            output: None,
            failure: None,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn preview(&self) -> &BlobHandle {
        &self.preview
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// present only while the task is completed
    pub fn output(&self) -> Option<&ConvertedImage> {
        self.output.as_ref()
    }

    /// reason of the last failed conversion
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Moves the task into `Converting` and hands back the previous output,
    /// which the caller has to release.
    pub(crate) fn start_conversion(&mut self) -> Option<ConvertedImage> {
        self.status = TaskStatus::Converting;
        self.failure = None;
        self.output.take()
    }

    pub(crate) fn complete(&mut self, handle: BlobHandle, format: TargetFormat) {
        self.status = TaskStatus::Completed;
        self.output = Some(ConvertedImage { handle, format });
    }

    pub(crate) fn fail(&mut self, reason: String) {
        self.status = TaskStatus::Failed;
        self.failure = Some(reason);
    }

    /// all handles owned by this task
    pub(crate) fn into_handles(self) -> impl Iterator<Item = BlobHandle> {
        std::iter::once(self.preview).chain(self.output.map(|output| output.handle))
    }
}

#[cfg(test)]
mod test {
    use super::{ImageTask, SourceFile, TaskId, TaskStatus};
    use crate::blob::BlobRegistry;
    use crate::image::TargetFormat;

    fn create_task(registry: &mut BlobRegistry) -> ImageTask {
        let source = SourceFile::new("cat.png", vec![1, 2, 3]);
        let preview = registry.create(source.bytes().to_vec(), "image/png");
        ImageTask::new(TaskId(7), source, "image/png", preview)
    }

    #[test]
    fn new_task_is_pending_without_output() {
        let mut registry = BlobRegistry::new();
        let task = create_task(&mut registry);
        assert_eq!(task.status(), TaskStatus::Pending);
        assert!(task.output().is_none());
        assert!(task.failure().is_none());
        assert_eq!(task.id().to_string(), "#7");
    }

    #[test]
    fn restarting_completed_task_returns_previous_output() {
        let mut registry = BlobRegistry::new();
        let mut task = create_task(&mut registry);
        assert!(task.start_conversion().is_none());
        let output = registry.create(vec![9], "image/bmp");
        task.complete(output.clone(), TargetFormat::Bmp);
        assert_eq!(task.status(), TaskStatus::Completed);

        let previous = task.start_conversion().expect("previous output");
        assert_eq!(previous.handle(), &output);
        assert_eq!(previous.format(), TargetFormat::Bmp);
        assert_eq!(task.status(), TaskStatus::Converting);
        assert!(task.output().is_none());
    }

    #[test]
    fn failed_task_keeps_reason_until_restarted() {
        let mut registry = BlobRegistry::new();
        let mut task = create_task(&mut registry);
        task.start_conversion();
        task.fail("broken".to_owned());
        assert_eq!(task.failure(), Some("broken"));
        assert!(task.status().is_terminal());
        task.start_conversion();
        assert!(task.failure().is_none());
    }

    #[test]
    fn handles_include_output_when_present() {
        let mut registry = BlobRegistry::new();
        let mut task = create_task(&mut registry);
        task.start_conversion();
        let output = registry.create(vec![], "image/png");
        task.complete(output, TargetFormat::Png);
        assert_eq!(task.into_handles().count(), 2);
    }
}
