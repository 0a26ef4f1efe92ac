//! Interpreter table for runnable languages.

/// How to run a source file for one language.
///
/// Command arguments may contain `<file>` (full path of the written
/// source), `<name>` (its file name) and `<path>` (the temp directory).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub extension: &'static str,
    pub command: &'static [&'static str],
}

const GO: Language = Language {
    extension: ".go",
    command: &["go", "run", "<file>"],
};
const BASH: Language = Language {
    extension: ".sh",
    command: &["bash", "<file>"],
};
const SH: Language = Language {
    extension: ".sh",
    command: &["sh", "<file>"],
};
const PYTHON: Language = Language {
    extension: ".py",
    command: &["python3", "<file>"],
};
const JAVASCRIPT: Language = Language {
    extension: ".js",
    command: &["node", "<file>"],
};
const RUBY: Language = Language {
    extension: ".rb",
    command: &["ruby", "<file>"],
};

/// Look up a fence language tag.
pub fn language(tag: &str) -> Option<Language> {
    match tag {
        "go" => Some(GO),
        "bash" => Some(BASH),
        "sh" => Some(SH),
        "python" | "python3" => Some(PYTHON),
        "javascript" | "js" => Some(JAVASCRIPT),
        "ruby" | "rb" => Some(RUBY),
        _ => None,
    }
}

impl Language {
    /// Expand placeholders into a concrete argument list.
    pub fn args(&self, file: &str, name: &str, dir: &str) -> Vec<String> {
        self.command
            .iter()
            .map(|arg| {
                arg.replace("<file>", file)
                    .replace("<name>", name)
                    .replace("<path>", dir)
            })
            .collect()
    }
}
