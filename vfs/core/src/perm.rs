//! Permission bits, access modes, and file type classification.

use bitflags::bitflags;

/// Mask selecting the file-type bits of a native mode value.
const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;
const S_IFREG: u32 = 0o100000;
const S_IFLNK: u32 = 0o120000;

bitflags! {
    /// The nine POSIX permission bits.
    ///
    /// Each flag's value is the native mode bit it stands for, so this one
    /// definition is both the decode table and the encode table; the two
    /// directions cannot drift.
    pub struct FilePerms: u32 {
        const OWNER_READ = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXEC = 0o100;
        const GROUP_READ = 0o040;
        const GROUP_WRITE = 0o020;
        const GROUP_EXEC = 0o010;
        const OTHERS_READ = 0o004;
        const OTHERS_WRITE = 0o002;
        const OTHERS_EXEC = 0o001;
    }
}

impl FilePerms {
    /// Decode the permission set carried by a native mode value. Type and
    /// setuid/sticky bits are ignored.
    pub fn from_mode(mode: u32) -> Self {
        Self::from_bits_truncate(mode & 0o777)
    }

    /// Fold the set back into native mode bits.
    pub fn mode_bits(self) -> u32 {
        self.bits()
    }
}

bitflags! {
    /// Access test modes; values match the native access-mask convention.
    pub struct AccessMode: u32 {
        const EXECUTE = 0o1;
        const WRITE = 0o2;
        const READ = 0o4;
    }
}

/// File type classification derived from a native mode value.
///
/// Variants are mutually exclusive: the type field is masked out whole, so a
/// symlink never also classifies as a regular file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    Other,
}

impl FileKind {
    pub fn from_mode(mode: u32) -> Self {
        match mode & S_IFMT {
            S_IFDIR => FileKind::Directory,
            S_IFLNK => FileKind::Symlink,
            S_IFREG => FileKind::Regular,
            _ => FileKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_matches_encode_for_every_bit() {
        let bits = [
            (0o400, FilePerms::OWNER_READ),
            (0o200, FilePerms::OWNER_WRITE),
            (0o100, FilePerms::OWNER_EXEC),
            (0o040, FilePerms::GROUP_READ),
            (0o020, FilePerms::GROUP_WRITE),
            (0o010, FilePerms::GROUP_EXEC),
            (0o004, FilePerms::OTHERS_READ),
            (0o002, FilePerms::OTHERS_WRITE),
            (0o001, FilePerms::OTHERS_EXEC),
        ];
        assert_eq!(bits.len(), 9);
        for (mask, perm) in bits {
            assert_eq!(FilePerms::from_mode(mask), perm);
            assert_eq!(perm.mode_bits(), mask);
        }
    }

    #[test]
    fn decode_strips_type_bits() {
        assert_eq!(
            FilePerms::from_mode(0o100644),
            FilePerms::OWNER_READ
                | FilePerms::OWNER_WRITE
                | FilePerms::GROUP_READ
                | FilePerms::OTHERS_READ
        );
    }

    #[test]
    fn encode_or_combines() {
        let set = FilePerms::OWNER_READ | FilePerms::OWNER_WRITE | FilePerms::OWNER_EXEC;
        assert_eq!(set.mode_bits(), 0o700);
        assert_eq!(FilePerms::empty().mode_bits(), 0);
    }

    #[test]
    fn kinds_are_mutually_exclusive() {
        assert_eq!(FileKind::from_mode(0o100644), FileKind::Regular);
        assert_eq!(FileKind::from_mode(0o040755), FileKind::Directory);
        // A symlink's mode carries the regular-file bit; masking the whole
        // type field must still classify it as a symlink only.
        assert_eq!(FileKind::from_mode(0o120777), FileKind::Symlink);
        assert_eq!(FileKind::from_mode(0o060660), FileKind::Other);
        assert_eq!(FileKind::from_mode(0o010600), FileKind::Other);
    }

    #[test]
    fn access_mask_values() {
        assert_eq!(AccessMode::READ.bits(), 4);
        assert_eq!(AccessMode::WRITE.bits(), 2);
        assert_eq!(AccessMode::EXECUTE.bits(), 1);
        assert_eq!((AccessMode::READ | AccessMode::WRITE).bits(), 6);
    }
}
