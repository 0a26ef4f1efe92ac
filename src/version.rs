//! Build version reporting.

/// Version and commit the binary was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: Option<&'static str>,
    pub commit: Option<&'static str>,
}

impl VersionInfo {
    /// Version of this build, with the commit from `DECK_GIT_COMMIT` when
    /// it was set at compile time.
    pub const fn current() -> Self {
        Self {
            version: Some(env!("CARGO_PKG_VERSION")),
            commit: option_env!("DECK_GIT_COMMIT"),
        }
    }

    /// Version, else commit, else `dev`.
    pub fn short(&self) -> &'static str {
        non_empty(self.version)
            .or_else(|| non_empty(self.commit))
            .unwrap_or("dev")
    }

    /// `VERSION (COMMIT)` when both are known.
    pub fn info(&self) -> String {
        match (non_empty(self.version), non_empty(self.commit)) {
            (Some(version), Some(commit)) => format!("{version} ({commit})"),
            _ => self.short().to_string(),
        }
    }
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| !v.is_empty())
}
