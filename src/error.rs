use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidColorFormat(String),
    NoValidImages,
    NothingToConvert,
    NothingToPackage,
    UnableToDecodeImage(String),
    UnableToEncodeImage(String),
    EmptyEncoderOutput,
    NoImageOnSurface,
    FailedToWriteArchive(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    UnableToCreateOutputDirectory(String, std::io::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColorFormat(input) => {
                write!(
                    f,
                    "Invalid hex color '{}'. Expected 6 hex digits, e.g. #FF5733 or FF5733",
                    input
                )
            }
            Self::NoValidImages => write!(f, "None of the selected files is a valid image"),
            Self::NothingToConvert => write!(f, "No images selected for conversion"),
            Self::NothingToPackage => write!(f, "No converted images to package"),
            Self::UnableToDecodeImage(reason) => {
                write!(f, "Failed to load image: {}", reason)
            }
            Self::UnableToEncodeImage(reason) => {
                write!(f, "Failed to convert image: {}", reason)
            }
            Self::EmptyEncoderOutput => {
                write!(f, "Failed to convert image: encoder produced no data")
            }
            Self::NoImageOnSurface => {
                write!(f, "Nothing has been drawn onto the raster surface yet")
            }
            Self::FailedToWriteArchive(reason) => {
                write!(f, "Failed to create ZIP archive: {}", reason)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::UnableToCreateOutputDirectory(path, error) => {
                write!(f, "Unable to create output directory '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::UnableToCreateOutputDirectory(_, error) => Some(error),
            _ => None,
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(value: zip::result::ZipError) -> Self {
        Self::FailedToWriteArchive(value.to_string())
    }
}
