//! NAND image format constants
//!
//! All values are fixed by the on-flash format. Offsets are raw image
//! offsets unless stated otherwise.

/// Page and marker geometry
pub mod layout {
    /// Logical page size preceding each marker run
    pub const PAGE_SZ: u64 = 0x200;

    /// Size of the out-of-band marker run after each page
    pub const DELIM_SZ: u64 = 0x10;

    /// Distance between the starts of two consecutive marker runs
    pub const MARKER_PERIOD: u64 = PAGE_SZ + DELIM_SZ;

    /// Storage block size used by data offsets
    pub const BLOCK_SZ: u64 = 0x1080;

    /// Payload copy chunk size
    pub const READ_CHUNK_SIZE: usize = PAGE_SZ as usize;
}

/// Root directory location
pub mod directory {
    use super::layout::BLOCK_SZ;

    /// Directory location, in blocks
    pub const FS_ROOT_DIR_OFFSET: u64 = 0x8;

    /// Header bytes preceding the first directory record
    pub const FS_ROOT_DIR_RESERVED: u64 = 0x20;

    /// Raw offset of the first directory record
    pub const FS_ROOT_DIR_START: u64 = FS_ROOT_DIR_OFFSET * BLOCK_SZ + FS_ROOT_DIR_RESERVED;
}

/// Directory record field widths
pub mod record {
    pub const FILENAME_SZ: usize = 0xD;
    pub const EXT_ATTR_1_SZ: usize = 0x3;
    pub const FILE_LEN_SZ: usize = 0x4;
    pub const SPACER_1_SZ: usize = 0x5;
    pub const EXT_ATTR_2_SZ: usize = 0x2;
    pub const SPACER_2_SZ: usize = 0x5;

    /// Raw size of one directory record
    pub const RECORD_SZ: usize =
        FILENAME_SZ + EXT_ATTR_1_SZ + FILE_LEN_SZ + SPACER_1_SZ + EXT_ATTR_2_SZ + SPACER_2_SZ;

    /// Shift applied to the data offset field to get a block number
    pub const DATA_OFFSET_SHIFT: u32 = 4;
}
