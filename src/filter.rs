use crate::naming::split_extension;

pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 11] = [
    ".nes", ".gb", ".gbc", ".gba", ".smc", ".sfc", ".md", ".gen", ".a26", ".bin", ".zip",
];

pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Which uploads are accepted. Both checks run before anything touches disk.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed: Vec<String>,
    max_size: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_UPLOAD_SIZE)
    }
}

impl UploadPolicy {
    /// Extensions may be given with or without the leading dot, in any case.
    pub fn new<I, S>(extensions: I, max_size: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { allowed, max_size }
    }

    pub fn accept(&self, original_name: &str) -> bool {
        match split_extension(original_name) {
            (_, Some(ext)) if !ext.is_empty() => {
                let ext = ext.to_ascii_lowercase();
                self.allowed.iter().any(|a| *a == ext)
            }
            _ => false,
        }
    }

    pub fn within_size(&self, len: usize) -> bool {
        len <= self.max_size
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// `.nes, .gb, ...` for error messages.
    pub fn describe_allowed(&self) -> String {
        self.allowed
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_extensions() {
        let policy = UploadPolicy::default();
        assert!(policy.accept("game.nes"));
        assert!(policy.accept("GAME.NES"));
        assert!(policy.accept("pokemon.red.GbC"));
        assert!(policy.accept("pack.zip"));
    }

    #[test]
    fn rejects_everything_else() {
        let policy = UploadPolicy::default();
        assert!(!policy.accept("game.txt"));
        assert!(!policy.accept("noext"));
        assert!(!policy.accept("trailing."));
        assert!(!policy.accept(""));
        assert!(!policy.accept("nes"));
        assert!(!policy.accept("game.nes.exe"));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let policy = UploadPolicy::new(["nes"], 10);
        assert!(policy.within_size(10));
        assert!(!policy.within_size(11));
        assert_eq!(UploadPolicy::default().max_size(), 10 * 1024 * 1024);
    }

    #[test]
    fn normalizes_configured_extensions() {
        let policy = UploadPolicy::new([".SFC", "smc", ""], 1);
        assert!(policy.accept("mario.sfc"));
        assert!(policy.accept("mario.SMC"));
        assert_eq!(policy.describe_allowed(), ".sfc, .smc");
    }
}
