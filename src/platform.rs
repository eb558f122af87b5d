use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Apple macOS.
    MacOs,
    /// Linux (any distribution).
    Linux,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::MacOs => write!(f, "macos"),
            Os::Linux => write!(f, "linux"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    /// The detected operating system.
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self { os: detect_os() }
    }

    /// Create a platform with explicit values (for testing).
    #[cfg(test)]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether this is macOS.
    #[must_use]
    pub fn is_macos(&self) -> bool {
        self.os == Os::MacOs
    }

    /// Whether this is Linux.
    #[must_use]
    pub fn is_linux(&self) -> bool {
        self.os == Os::Linux
    }
}

fn detect_os() -> Os {
    if cfg!(target_os = "macos") {
        Os::MacOs
    } else {
        // Default to Linux for other Unix-like systems
        Os::Linux
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_returns_valid() {
        let p = Platform::detect();
        assert!(p.is_macos() || p.is_linux());
    }

    #[test]
    fn platform_new_macos() {
        let p = Platform::new(Os::MacOs);
        assert!(p.is_macos());
        assert!(!p.is_linux());
    }

    #[test]
    fn platform_new_linux() {
        let p = Platform::new(Os::Linux);
        assert!(p.is_linux());
        assert!(!p.is_macos());
    }

    #[test]
    fn os_display() {
        assert_eq!(Os::MacOs.to_string(), "macos");
        assert_eq!(Os::Linux.to_string(), "linux");
    }
}
