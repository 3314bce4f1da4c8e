use crate::errors::{ErrorKind, Result};
use failchain::bail;
use serde::de::{Deserialize, Deserializer, Error as SerdeDeError};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// The name of a lump: at most eight bytes, zero-padded to exactly eight.
///
/// Everything after the first NUL byte is forced to NUL, so two names decoded
/// from directory entries with different padding garbage still compare equal.
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct LumpName(pub [u8; 8]);

impl LumpName {
    pub fn from_bytes(bytes: &[u8]) -> Result<LumpName> {
        let mut name = [0u8; 8];
        if bytes.len() > 8 {
            bail!(ErrorKind::invalid_name(bytes));
        }
        for (dest, &byte) in name.iter_mut().zip(bytes.iter()) {
            if byte == 0 {
                break;
            }
            if !byte.is_ascii() || byte.is_ascii_control() {
                bail!(ErrorKind::invalid_name(bytes));
            }
            *dest = byte;
        }
        Ok(LumpName(name))
    }

    /// Builds a name from `prefix` followed by the bytes of `self`, failing if
    /// the result does not fit in eight bytes.
    pub fn prefixed(&self, prefix: &[u8]) -> Result<LumpName> {
        let mut joined = prefix.to_vec();
        joined.extend(self.iter().cloned().take_while(|&byte| byte != 0));
        LumpName::from_bytes(&joined)
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl FromStr for LumpName {
    type Err = crate::errors::Error;
    fn from_str(value: &str) -> Result<LumpName> {
        LumpName::from_bytes(value.as_bytes())
    }
}

impl fmt::Display for LumpName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for &byte in self.iter().take_while(|&&byte| byte != 0) {
            write!(formatter, "{}", byte as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for LumpName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "LumpName({})", self)
    }
}

impl Deref for LumpName {
    type Target = [u8; 8];
    fn deref(&self) -> &[u8; 8] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for LumpName {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        Self: Sized,
        D: Deserializer<'de>,
    {
        let bytes = <[u8; 8]>::deserialize(deserializer)?;
        LumpName::from_bytes(&bytes)
            .map_err(|_| SerdeDeError::custom(format!("invalid lump name {:?}", bytes)))
    }
}
