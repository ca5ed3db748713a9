use std::{
    fs::{self, File, OpenOptions},
    io::{Read, Write},
    path::{Path, PathBuf},
};

pub use cli::CLIParser;
pub use error::Error;
use crate::image::{
    batch::{BatchImageConverter, BatchSummary},
    surface::CanvasSurface,
    task::SourceFile,
    Quality, TargetFormat,
};

pub mod archive;
pub mod blob;
mod cli;
pub mod color;
mod error;
pub mod image;
mod logger;

pub type Result<T> = std::result::Result<T, error::Error>;

pub enum Arguments {
    Color(ColorArguments),
    Convert(ConvertArguments),
}

pub struct ColorArguments {
    values: Vec<String>,
    presets: bool,
}

pub struct ConvertArguments {
    input_files: Vec<PathBuf>,
    format: TargetFormat,
    quality: Quality,
    output: ConvertOutput,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvertOutput {
    Archive(PathBuf),
    Directory(PathBuf),
}

fn path_to_string(file_path: &Path) -> String {
    file_path.to_string_lossy().into_owned()
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_to_string(file_path), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_to_string(file_path), e))
}

fn read_source_file(file_path: &Path) -> Result<SourceFile> {
    let mut bytes = Vec::new();
    open_input_file(file_path)?
        .read_to_end(&mut bytes)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_to_string(file_path), e))?;
    let name = file_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path_to_string(file_path));
    Ok(SourceFile::new(name, bytes))
}

fn write_output_file(file_path: &Path, bytes: &[u8]) -> Result<()> {
    open_output_file(file_path)?
        .write_all(bytes)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_to_string(file_path), e))
}

/// Renders each requested color as hex, rgb and hsl lines.
pub fn describe_colors(arguments: &ColorArguments) -> Result<String> {
    let presets = arguments
        .presets
        .then_some(color::PRESET_COLORS)
        .unwrap_or_default();
    let mut blocks = Vec::new();
    for value in arguments
        .values
        .iter()
        .map(String::as_str)
        .chain(presets.iter().copied())
    {
        let color = color::convert(value)?;
        blocks.push(format!(
            "{}\n{}\n{}",
            color.hex(),
            color.rgb(),
            color.hsl()
        ));
    }
    Ok(blocks.join("\n\n"))
}

/// Reads, converts and writes out a batch of images. Images that fail to
/// convert are reported in the summary and left out of the output.
pub fn convert_images(arguments: &ConvertArguments) -> Result<BatchSummary> {
    let files = arguments
        .input_files
        .iter()
        .map(|file_path| read_source_file(file_path))
        .collect::<Result<Vec<_>>>()?;
    let mut converter = BatchImageConverter::new();
    converter.ingest(files)?;
    let mut surface = CanvasSurface::new();
    let summary = converter.convert_all(
        &mut surface,
        arguments.format,
        Some(arguments.quality),
        &mut logger::log_progress,
    )?;
    for task in converter.tasks() {
        if let Some(reason) = task.failure() {
            log::error!("{}: {}", task.source().name(), reason);
        }
    }

    match &arguments.output {
        ConvertOutput::Archive(archive_path) => {
            let archive = converter.package_completed()?;
            write_output_file(archive_path, &archive)?;
        }
        ConvertOutput::Directory(directory) => {
            let outputs = converter.completed_outputs();
            if outputs.is_empty() {
                return Err(Error::NothingToPackage);
            }
            fs::create_dir_all(directory).map_err(|e| {
                Error::UnableToCreateOutputDirectory(path_to_string(directory), e)
            })?;
            for (name, blob) in outputs {
                write_output_file(&directory.join(name), blob.bytes())?;
            }
        }
    }
    converter.clear_all();
    Ok(summary)
}
