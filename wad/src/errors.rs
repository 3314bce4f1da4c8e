use failchain::{BoxedError, ChainErrorKind};
use failure::Fail;
use std::fmt::Debug;
use std::path::Path;
use std::result::Result as StdResult;

pub type Error = BoxedError<ErrorKind>;
pub type Result<T> = StdResult<T, Error>;

#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "WAD I/O error: {}", 0)]
    Io(String),

    #[fail(display = "Truncated WAD header: {}", 0)]
    TruncatedHeader(String),

    #[fail(display = "Truncated WAD directory: {}", 0)]
    TruncatedDirectory(String),

    #[fail(display = "Truncated lump: {}", 0)]
    TruncatedLump(String),

    #[fail(display = "Corrupt WAD: {}", 0)]
    CorruptWad(String),

    #[fail(display = "Map not found: {}", 0)]
    MapNotFound(String),

    #[fail(display = "Malformed lump record: {}", 0)]
    MalformedRecord(String),

    #[fail(display = "Unsupported GL node format: {}", 0)]
    UnsupportedGlFormat(String),

    #[fail(display = "Corrupt BSP tree: {}", 0)]
    CorruptBsp(String),
}

impl ChainErrorKind for ErrorKind {
    type Error = Error;
}

impl ErrorKind {
    pub(crate) fn on_file_open(path: &Path) -> ErrorKind {
        ErrorKind::Io(format!("failed to open WAD file {:?}", path))
    }

    pub(crate) fn bad_header(actual_size: usize, needed_size: usize) -> ErrorKind {
        ErrorKind::TruncatedHeader(format!(
            "file holds {} bytes, the header needs {}",
            actual_size, needed_size
        ))
    }

    pub(crate) fn bad_identifier(identifier: &[u8; 4]) -> ErrorKind {
        ErrorKind::CorruptWad(format!(
            "expected identifier IWAD or PWAD, got {:?}",
            String::from_utf8_lossy(&identifier[..])
        ))
    }

    pub(crate) fn bad_directory(offset: u64, num_lumps: u64, total_size: usize) -> ErrorKind {
        ErrorKind::TruncatedDirectory(format!(
            "directory of {} lumps at offset {} overruns the file ({} bytes)",
            num_lumps, offset, total_size
        ))
    }

    pub(crate) fn bad_lump_bounds(index: usize, name: impl Debug, end: u64) -> ErrorKind {
        ErrorKind::TruncatedLump(format!(
            "lump {} ({:?}) extends to offset {}, past the end of the file",
            index, name, end
        ))
    }

    pub(crate) fn missing_positional_lump(map: impl Debug, index: usize) -> ErrorKind {
        ErrorKind::CorruptWad(format!(
            "map {:?} is missing its lump at directory index {}",
            map, index
        ))
    }

    pub(crate) fn map_not_found(name: impl Debug) -> ErrorKind {
        ErrorKind::MapNotFound(format!("no marker lump named {:?}", name))
    }

    pub(crate) fn bad_lump_size(
        index: usize,
        name: impl Debug,
        total_size: usize,
        element_size: usize,
    ) -> ErrorKind {
        ErrorKind::MalformedRecord(format!(
            "lump {} ({:?}) has size {}, not a multiple of its {}-byte records",
            index, name, total_size, element_size
        ))
    }

    pub(crate) fn bad_lump_element(index: usize, name: impl Debug, element: usize) -> ErrorKind {
        ErrorKind::MalformedRecord(format!(
            "in lump {} ({:?}), record {} failed to decode",
            index, name, element
        ))
    }

    pub(crate) fn unsupported_gl_magic(magic: &[u8]) -> ErrorKind {
        ErrorKind::UnsupportedGlFormat(format!(
            "GL_VERT magic {:?}, only gNd2 is supported",
            String::from_utf8_lossy(magic)
        ))
    }

    pub(crate) fn corrupt_bsp(detail: impl Into<String>) -> ErrorKind {
        ErrorKind::CorruptBsp(detail.into())
    }

    pub(crate) fn invalid_name(bytes: &[u8]) -> ErrorKind {
        ErrorKind::CorruptWad(format!("invalid lump name {:?}", bytes))
    }
}
