use std::fmt;

/// HTTP Version, a major and minor digit pair.
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Version {
    major: u8,
    minor: u8,
}

impl Version {
    /// `HTTP/1.0`
    pub const HTTP_10: Version = Version { major: 1, minor: 0 };

    /// `HTTP/1.1`
    pub const HTTP_11: Version = Version { major: 1, minor: 1 };

    pub(crate) const fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Returns the major version digit.
    #[inline]
    pub const fn major(&self) -> u8 {
        self.major
    }

    /// Returns the minor version digit.
    #[inline]
    pub const fn minor(&self) -> u8 {
        self.minor
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Version {
        Version::HTTP_11
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}
