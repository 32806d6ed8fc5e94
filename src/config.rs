//! Server configuration.
//!
//! Settings come from three layers, lowest precedence first: the global
//! config file, a local `.docforgerc` override, and command-line flags.
//! Files hold flag tokens in the same syntax as the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub dot_bin: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`; `other` wins where both are set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            bind: other.bind.clone().or_else(|| self.bind.clone()),
            port: other.port.or(self.port),
            dot_bin: other.dot_bin.clone().or_else(|| self.dot_bin.clone()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!(
            "{}:{}",
            self.bind.as_deref().unwrap_or("0.0.0.0"),
            self.port.unwrap_or(8000)
        )
    }

    pub fn dot_binary(&self) -> PathBuf {
        self.dot_bin.clone().unwrap_or_else(|| PathBuf::from("dot"))
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("docforge").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("docforge")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("docforge").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("docforge").join("config");
        }
    }

    PathBuf::from(".docforgerc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".docforgerc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# docforge defaults (saved with --save)".to_string());
    if let Some(bind) = &flags.bind {
        lines.push(format!("--bind {bind}"));
    }
    if let Some(port) = flags.port {
        lines.push(format!("--port {port}"));
    }
    if let Some(dot_bin) = &flags.dot_bin {
        lines.push(format!("--dot-bin {}", dot_bin.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--bind" {
            if let Some(next) = tokens.get(i + 1) {
                flags.bind = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--bind=") {
            flags.bind = Some(value.to_string());
        } else if token == "--port" {
            if let Some(next) = tokens.get(i + 1) {
                flags.port = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--port=") {
            flags.port = value.parse().ok();
        } else if token == "--dot-bin" {
            if let Some(next) = tokens.get(i + 1) {
                flags.dot_bin = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--dot-bin=") {
            flags.dot_bin = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = vec![
            "docforge".to_string(),
            "--bind".to_string(),
            "127.0.0.1".to_string(),
            "--port=9000".to_string(),
            "--dot-bin".to_string(),
            "/usr/local/bin/dot".to_string(),
        ];
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.bind.as_deref(), Some("127.0.0.1"));
        assert_eq!(flags.port, Some(9000));
        assert_eq!(flags.dot_bin, Some(PathBuf::from("/usr/local/bin/dot")));
    }

    #[test]
    fn test_config_union_prefers_overlay() {
        let file = ConfigFlags {
            bind: Some("0.0.0.0".to_string()),
            port: Some(8000),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            port: Some(9000),
            dot_bin: Some(PathBuf::from("dot")),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(merged.port, Some(9000));
        assert_eq!(merged.dot_bin, Some(PathBuf::from("dot")));
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let flags = ConfigFlags::default();
        assert_eq!(flags.bind_addr(), "0.0.0.0:8000");
        assert_eq!(flags.dot_binary(), PathBuf::from("dot"));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".docforgerc");
        let flags = ConfigFlags {
            bind: Some("127.0.0.1".to_string()),
            port: Some(9000),
            dot_bin: Some(PathBuf::from("/opt/graphviz/bin/dot")),
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }
}
