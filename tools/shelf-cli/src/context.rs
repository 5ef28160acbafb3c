//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use console::Term;
use dialoguer::{Input, Password};
use shelf_auth::{Credentials, SessionContext};
use shelf_data::{sign_in, DummyJsonApi, StoreApi};

use crate::commands::CredentialArgs;
use crate::config::{AuthSection, ShelfConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Environment variable holding the username.
pub const USERNAME_ENV: &str = "SHELF_USERNAME";

/// Environment variable holding the password.
pub const PASSWORD_ENV: &str = "SHELF_PASSWORD";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ShelfConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (ShelfConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some(path) => {
                    let config = ShelfConfig::load(&path.to_string_lossy())?;
                    (config, Some(path))
                }
                None => (ShelfConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Client for the configured store API.
    pub fn api(&self) -> DummyJsonApi {
        DummyJsonApi::new(self.config.api.to_api_config())
    }

    /// Resolve credentials and log in, returning the established session.
    pub async fn sign_in<A>(&self, api: &A, args: &CredentialArgs) -> Result<SessionContext>
    where
        A: StoreApi + ?Sized,
    {
        let credentials = self.resolve_credentials(args)?;
        let mut session = SessionContext::new();

        let spinner = self.output.spinner(&format!("Signing in as {}...", credentials.username));
        let result = sign_in(api, &mut session, &credentials, self.config.auth.session_minutes).await;
        spinner.finish_and_clear();

        let active = result.context("Login failed")?;
        self.output
            .debug(&format!("Signed in as {} (session {})", active.user.username, active.id));
        Ok(session)
    }

    /// Credentials from flags, then the environment, then the config file,
    /// prompting for whatever is still missing.
    pub fn resolve_credentials(&self, args: &CredentialArgs) -> Result<Credentials> {
        let (username, password) = merge_credentials(args, |key| std::env::var(key).ok(), &self.config.auth);

        let interactive = !self.output.is_json() && Term::stderr().is_term();
        let username = match username {
            Some(u) => u,
            None if interactive => Input::<String>::new()
                .with_prompt("Username")
                .interact_text()
                .context("Failed to read username")?,
            None => String::new(),
        };
        let password = match password {
            Some(p) => p,
            None if interactive => Password::new()
                .with_prompt("Password")
                .interact()
                .context("Failed to read password")?,
            None => String::new(),
        };

        let credentials = Credentials::new(username, password);
        credentials.validate().with_context(|| {
            format!(
                "Pass --username/--password or set {} and {}",
                USERNAME_ENV, PASSWORD_ENV
            )
        })?;
        Ok(credentials)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Pick each credential field from the first source that has it. Empty
/// values count as missing.
fn merge_credentials(
    args: &CredentialArgs,
    env: impl Fn(&str) -> Option<String>,
    config: &AuthSection,
) -> (Option<String>, Option<String>) {
    let present = |v: Option<String>| v.filter(|s| !s.is_empty());
    let username = present(args.username.clone())
        .or_else(|| present(env(USERNAME_ENV)))
        .or_else(|| present(config.username.clone()));
    let password = present(args.password.clone())
        .or_else(|| present(env(PASSWORD_ENV)))
        .or_else(|| present(config.password.clone()));
    (username, password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(username: Option<&str>, password: Option<&str>) -> CredentialArgs {
        CredentialArgs {
            username: username.map(String::from),
            password: password.map(String::from),
        }
    }

    fn config_auth(username: Option<&str>, password: Option<&str>) -> AuthSection {
        AuthSection {
            username: username.map(String::from),
            password: password.map(String::from),
            ..AuthSection::default()
        }
    }

    #[test]
    fn test_flags_win() {
        let env: HashMap<&str, String> = HashMap::from([(USERNAME_ENV, "env-user".to_string())]);
        let (u, p) = merge_credentials(
            &args(Some("flag-user"), Some("flag-pass")),
            |k| env.get(k).cloned(),
            &config_auth(Some("cfg-user"), Some("cfg-pass")),
        );
        assert_eq!(u.as_deref(), Some("flag-user"));
        assert_eq!(p.as_deref(), Some("flag-pass"));
    }

    #[test]
    fn test_env_before_config() {
        let env: HashMap<&str, String> = HashMap::from([(PASSWORD_ENV, "env-pass".to_string())]);
        let (u, p) = merge_credentials(
            &args(None, None),
            |k| env.get(k).cloned(),
            &config_auth(Some("cfg-user"), Some("cfg-pass")),
        );
        assert_eq!(u.as_deref(), Some("cfg-user"));
        assert_eq!(p.as_deref(), Some("env-pass"));
    }

    #[test]
    fn test_empty_values_fall_through() {
        let (u, p) = merge_credentials(&args(Some(""), None), |_| Some(String::new()), &config_auth(None, None));
        assert_eq!(u, None);
        assert_eq!(p, None);
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = std::env::temp_dir().join(format!("shelf-cli-find-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("shelf.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.join("shelf.toml")));
        std::fs::remove_dir_all(&root).unwrap();
    }
}
