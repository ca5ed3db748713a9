use super::progress::{ProgressEvent, ProgressListener};
use super::surface::RasterSurface;
use super::task::{ImageTask, SourceFile, TaskId, TaskStatus};
use super::{output_file_name, sniff_mime_type, Quality, TargetFormat};
use crate::archive::zip::ZipArchiveWriter;
use crate::archive::ArchiveWriter;
use crate::blob::{Blob, BlobHandle, BlobRegistry};
use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSummary {
    pub completed: usize,
    pub failed: usize,
    pub total: usize,
}

/// Owns the queued images of one session and every handle they hold.
#[derive(Default)]
pub struct BatchImageConverter {
    tasks: Vec<ImageTask>,
    blobs: BlobRegistry,
    next_task_id: u64,
    progress: f32,
}

impl BatchImageConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[ImageTask] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&ImageTask> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    pub fn blob(&self, handle: &BlobHandle) -> Option<&Blob> {
        self.blobs.get(handle)
    }

    pub fn live_handle_count(&self) -> usize {
        self.blobs.live_count()
    }

    /// progress of the last batch in percent
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Queues every file that looks like an image and returns the ids of the
    /// new tasks. Nothing is queued when no file qualifies.
    pub fn ingest<I>(&mut self, files: I) -> crate::Result<Vec<TaskId>>
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let accepted: Vec<(SourceFile, &'static str)> = files
            .into_iter()
            .filter_map(|file| match sniff_mime_type(file.name(), file.bytes()) {
                Some(mime_type) => Some((file, mime_type)),
                None => {
                    log::debug!("Skipping '{}', not an image", file.name());
                    None
                }
            })
            .collect();
        if accepted.is_empty() {
            return Err(Error::NoValidImages);
        }

        let mut ids = Vec::with_capacity(accepted.len());
        for (file, mime_type) in accepted {
            let id = TaskId(self.next_task_id);
            self.next_task_id += 1;
            let preview = self.blobs.create(file.bytes().to_vec(), mime_type);
            self.tasks.push(ImageTask::new(id, file, mime_type, preview));
            ids.push(id);
        }
        log::info!("{} image(s) loaded", ids.len());
        Ok(ids)
    }

    /// Converts every task in list order, one at a time.
    ///
    /// A failing task is marked `Failed` and the batch moves on; the error is
    /// kept on the task. Each task emits a `Converting` event before its
    /// conversion starts and a terminal event once it finished.
    pub fn convert_all<S, L>(
        &mut self,
        surface: &mut S,
        format: TargetFormat,
        quality: Option<Quality>,
        listener: &mut L,
    ) -> crate::Result<BatchSummary>
    where
        S: RasterSurface + ?Sized,
        L: ProgressListener + ?Sized,
    {
        if self.tasks.is_empty() {
            return Err(Error::NothingToConvert);
        }
        let quality = quality.filter(|_| format.is_lossy());
        let total = self.tasks.len();
        let mut summary = BatchSummary {
            completed: 0,
            failed: 0,
            total,
        };
        self.progress = 0_f32;
        log::info!(
            "Converting {} image(s) to {}",
            total,
            format.extension().to_uppercase()
        );

        for index in 0..total {
            let task = &mut self.tasks[index];
            if let Some(previous) = task.start_conversion() {
                self.blobs.revoke(previous.handle());
            }
            let task_id = task.id();
            listener.on_progress(&ProgressEvent {
                task_id,
                status: TaskStatus::Converting,
                completed: index,
                total,
            });

            let task = &mut self.tasks[index];
            match convert_single_image(surface, task.source().bytes(), format, quality) {
                Ok(bytes) => {
                    let handle = self.blobs.create(bytes, format.mime_type());
                    task.complete(handle, format);
                    summary.completed += 1;
                    log::debug!("Task {} converted", task_id);
                }
                Err(error) => {
                    log::warn!(
                        "Task {} ('{}') failed: {}",
                        task_id,
                        task.source().name(),
                        error
                    );
                    task.fail(error.to_string());
                    summary.failed += 1;
                }
            }

            let status = self.tasks[index].status();
            self.progress = (index + 1) as f32 / total as f32 * 100_f32;
            listener.on_progress(&ProgressEvent {
                task_id,
                status,
                completed: index + 1,
                total,
            });
        }

        log::info!(
            "{} image(s) converted successfully, {} failed",
            summary.completed,
            summary.failed
        );
        Ok(summary)
    }

    /// Packs every completed output into one ZIP archive.
    pub fn package_completed(&self) -> crate::Result<Vec<u8>> {
        self.package_completed_with(ZipArchiveWriter::new())
    }

    pub fn package_completed_with<W>(&self, mut writer: W) -> crate::Result<Vec<u8>>
    where
        W: ArchiveWriter,
    {
        let entries = self.completed_outputs();
        if entries.is_empty() {
            return Err(Error::NothingToPackage);
        }
        let count = entries.len();
        for (name, blob) in entries {
            writer.add_entry(&name, blob.bytes())?;
        }
        let archive = writer.finish()?;
        log::info!("{} image(s) packaged ({} bytes)", count, archive.len());
        Ok(archive)
    }

    /// Download names and bytes of every completed task, in list order.
    pub fn completed_outputs(&self) -> Vec<(String, &Blob)> {
        self.tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Completed)
            .filter_map(|task| {
                let output = task.output()?;
                let blob = self.blobs.get(output.handle())?;
                Some((output_file_name(task.source().name(), output.format()), blob))
            })
            .collect()
    }

    /// Download name of a completed task.
    pub fn output_file_name(&self, id: TaskId) -> Option<String> {
        let task = self.task(id)?;
        let output = task.output()?;
        Some(output_file_name(task.source().name(), output.format()))
    }

    /// Drops the task and releases its handles. Unknown ids are ignored.
    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let Some(position) = self.tasks.iter().position(|task| task.id() == id) else {
            return false;
        };
        let task = self.tasks.remove(position);
        for handle in task.into_handles() {
            self.blobs.revoke(&handle);
        }
        true
    }

    pub fn clear_all(&mut self) {
        for task in self.tasks.drain(..) {
            for handle in task.into_handles() {
                self.blobs.revoke(&handle);
            }
        }
        self.progress = 0_f32;
        log::info!("All cleared");
    }
}

fn convert_single_image<S: RasterSurface + ?Sized>(
    surface: &mut S,
    bytes: &[u8],
    format: TargetFormat,
    quality: Option<Quality>,
) -> crate::Result<Vec<u8>> {
    surface.decode(bytes)?;
    let output = surface.encode(format, quality)?;
    if output.is_empty() {
        return Err(Error::EmptyEncoderOutput);
    }
    Ok(output)
}
