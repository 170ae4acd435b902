// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Machine boot information
//!
//! The bootloader (IPL3) leaves a few words describing the console in
//! low RDRAM before jumping to the game. They are read once and cached.

use crate::cpu;
use crate::err::{Error, Result};

/// Location of the reset type word
pub const RESET_TYPE_ADDR: u64 = cpu::uncached(0x0000_030c);

/// Location of the video type word
pub const VIDEO_TYPE_ADDR: u64 = cpu::uncached(0x0000_0300);

/// Location of the memory size word
pub const PAK_TYPE_ADDR: u64 = cpu::uncached(0x0000_0318);

/// Console region
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoType {
    Pal = 0,
    Ntsc = 1,
    Mpal = 2,
}

/// How the console was started
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetType {
    /// Power switch
    Cold = 0,
    /// Reset button
    Warm = 1,
}

/// Installed RDRAM
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PakType {
    Jumper = 4 * 1024 * 1024,
    Expansion = 8 * 1024 * 1024,
}

impl TryFrom<u32> for VideoType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(VideoType::Pal),
            1 => Ok(VideoType::Ntsc),
            2 => Ok(VideoType::Mpal),
            _ => Err(Error::InvalidBootInfo(value)),
        }
    }
}

impl TryFrom<u32> for ResetType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(ResetType::Cold),
            1 => Ok(ResetType::Warm),
            _ => Err(Error::InvalidBootInfo(value)),
        }
    }
}

impl TryFrom<u32> for PakType {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            v if v == PakType::Jumper as u32 => Ok(PakType::Jumper),
            v if v == PakType::Expansion as u32 => Ok(PakType::Expansion),
            _ => Err(Error::InvalidBootInfo(value)),
        }
    }
}

/// Everything the bootloader reports about the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootInfo {
    pub reset: ResetType,
    pub video: VideoType,
    pub pak: PakType,
}

impl BootInfo {
    /// Decode the raw bootloader words
    pub fn from_raw(reset: u32, video: u32, pak: u32) -> Result<Self> {
        Ok(Self {
            reset: ResetType::try_from(reset)?,
            video: VideoType::try_from(video)?,
            pak: PakType::try_from(pak)?,
        })
    }
}

#[cfg(target_arch = "mips64")]
static BOOT_INFO: spin::Once<Result<BootInfo>> = spin::Once::new();

/// Boot information left by the bootloader
///
/// The words are read on first use only; later calls return the cached
/// result.
#[cfg(target_arch = "mips64")]
pub fn boot_info() -> Result<BootInfo> {
    use crate::reg::read_reg32;

    *BOOT_INFO.call_once(|| {
        let info = unsafe {
            BootInfo::from_raw(
                read_reg32(RESET_TYPE_ADDR as usize),
                read_reg32(VIDEO_TYPE_ADDR as usize),
                read_reg32(PAK_TYPE_ADDR as usize),
            )
        };
        match &info {
            Ok(info) => log_info!("boot info: {:?}", info),
            Err(err) => log_error!("bad boot info: {}", err),
        }
        info
    })
}
