//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# guidelint configuration

# Report format: text | json | pretty
format = "text"

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
]

# Respect .gitignore files
respect_gitignore = true

# Worker threads (default: number of CPUs)
# parallelism = 4

# Wall-clock budget for the whole run, in seconds
# timeout_secs = 30

# Every built-in rule is enabled by default. Each entry can disable a rule,
# override its severity or pass options.

[rules."complexity/max-arguments"]
enabled = true
# severity = "error"
options = { max = 3 }

[rules."naming/constant-screaming-snake-case"]
enabled = true
# options = { ignore = ["defaultProps"] }

# [rules."react/no-dangerous-html"]
# enabled = false
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("guidelint.toml");
    write_config(config_path, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit guidelint.toml to configure rules");
    println!("  2. Run: guidelint check");
    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidelint_core::Config;
    use tempfile::TempDir;

    #[test]
    fn template_resolves_against_builtin_rules() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        let registry = guidelint_rules::builtin_registry().unwrap();
        let active = registry.resolve(&config).unwrap();
        assert_eq!(active.len(), registry.len());
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("guidelint.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
