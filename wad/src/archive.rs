use crate::errors::{ErrorKind, Result};
use crate::name::LumpName;
use crate::types::{WadDirEntry, WadHeader, DIR_ENTRY_SIZE, HEADER_SIZE};
use failchain::{ensure, ResultExt};
use indexmap::IndexMap;
use log::info;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const IWAD_IDENTIFIER: &[u8; 4] = b"IWAD";
const PWAD_IDENTIFIER: &[u8; 4] = b"PWAD";

/// A decoded WAD container: the raw bytes plus a validated lump directory.
///
/// Lumps are looked up either by directory index or by name; name lookups
/// resolve to the first lump with that name, in directory order.
#[derive(Debug)]
pub struct Archive {
    data: Vec<u8>,
    lumps: Vec<LumpInfo>,
    index_map: IndexMap<LumpName, usize>,
}

#[derive(Debug)]
struct LumpInfo {
    name: LumpName,
    offset: usize,
    size: usize,
}

impl Archive {
    pub fn open(path: &Path) -> Result<Archive> {
        info!("Loading WAD file {:?}...", path);
        let data = fs::read(path).chain_err(|| ErrorKind::on_file_open(path))?;
        let archive = Archive::from_bytes(data)?;
        info!("Loaded WAD with {} lumps.", archive.num_lumps());
        Ok(archive)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Archive> {
        ensure!(
            data.len() >= HEADER_SIZE,
            ErrorKind::bad_header(data.len(), HEADER_SIZE)
        );
        let header: WadHeader = bincode::deserialize(&data[..HEADER_SIZE])
            .chain_err(|| ErrorKind::bad_header(data.len(), HEADER_SIZE))?;
        ensure!(
            &header.identifier == IWAD_IDENTIFIER || &header.identifier == PWAD_IDENTIFIER,
            ErrorKind::bad_identifier(&header.identifier)
        );

        // All bounds are checked in u64 so huge counts cannot wrap.
        let num_lumps = u64::from(header.num_lumps);
        let directory_offset = u64::from(header.directory_offset);
        let directory_end = directory_offset + num_lumps * DIR_ENTRY_SIZE as u64;
        ensure!(
            directory_end <= data.len() as u64,
            ErrorKind::bad_directory(directory_offset, num_lumps, data.len())
        );

        let num_lumps = num_lumps as usize;
        let directory_offset = directory_offset as usize;
        let mut lumps = Vec::with_capacity(num_lumps);
        let mut index_map = IndexMap::with_capacity(num_lumps);
        for index in 0..num_lumps {
            let entry_offset = directory_offset + index * DIR_ENTRY_SIZE;
            let entry: WadDirEntry =
                bincode::deserialize(&data[entry_offset..entry_offset + DIR_ENTRY_SIZE])
                    .chain_err(|| ErrorKind::bad_lump_element(index, "directory", index))?;

            let end = u64::from(entry.offset) + u64::from(entry.size);
            ensure!(
                end <= data.len() as u64,
                ErrorKind::bad_lump_bounds(index, entry.name, end)
            );

            index_map.entry(entry.name).or_insert(index);
            lumps.push(LumpInfo {
                name: entry.name,
                offset: entry.offset as usize,
                size: entry.size as usize,
            });
        }

        Ok(Archive {
            data,
            lumps,
            index_map,
        })
    }

    pub fn num_lumps(&self) -> usize {
        self.lumps.len()
    }

    pub fn index_of(&self, name: LumpName) -> Option<usize> {
        self.index_map.get(&name).cloned()
    }

    pub fn named_lump(&self, name: LumpName) -> Option<Lump> {
        self.index_of(name).map(|index| Lump {
            archive: self,
            info: &self.lumps[index],
            index,
        })
    }

    pub fn lump_by_index(&self, index: usize) -> Option<Lump> {
        self.lumps.get(index).map(|info| Lump {
            archive: self,
            info,
            index,
        })
    }
}

/// A view into one lump of an `Archive`.
#[derive(Copy, Clone)]
pub struct Lump<'a> {
    archive: &'a Archive,
    info: &'a LumpInfo,
    index: usize,
}

impl<'a> Lump<'a> {
    pub fn name(&self) -> LumpName {
        self.info.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> usize {
        self.info.size
    }

    pub fn is_virtual(&self) -> bool {
        self.info.size == 0
    }

    /// The raw bytes of the lump. Bounds were validated at decode time.
    pub fn bytes(&self) -> &'a [u8] {
        &self.archive.data[self.info.offset..self.info.offset + self.info.size]
    }

    /// Decodes the lump as a sequence of fixed-width little-endian records.
    ///
    /// The width is dictated by the on-disk format, not by the in-memory
    /// layout of `T`, so a lump whose size is not an exact multiple of
    /// `record_width` fails with `MalformedRecord`.
    pub fn decode_vec<T: DeserializeOwned>(&self, record_width: usize) -> Result<Vec<T>> {
        self.decode_records(self.bytes(), record_width)
    }

    /// Like `decode_vec`, but skips a fixed-size preamble first.
    pub fn decode_vec_after_magic<T: DeserializeOwned>(
        &self,
        magic_size: usize,
        record_width: usize,
    ) -> Result<Vec<T>> {
        self.decode_records(&self.bytes()[magic_size..], record_width)
    }

    fn decode_records<T: DeserializeOwned>(
        &self,
        bytes: &[u8],
        record_width: usize,
    ) -> Result<Vec<T>> {
        ensure!(
            record_width > 0 && bytes.len() % record_width == 0,
            ErrorKind::bad_lump_size(self.index, self.name(), bytes.len(), record_width)
        );
        bytes
            .chunks(record_width)
            .enumerate()
            .map(|(element, chunk)| {
                bincode::deserialize(chunk)
                    .chain_err(|| ErrorKind::bad_lump_element(self.index, self.name(), element))
            })
            .collect()
    }
}
