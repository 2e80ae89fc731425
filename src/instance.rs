//! Per-user single-instance guard
//!
//! The token is a system-wide named lock (named mutex on Windows, abstract
//! socket on Linux, lock file on macOS) scoped by application and user
//! name. It is held until the process exits.

use std::fmt;

use single_instance::SingleInstance;

use crate::error::StartupError;

/// Result of trying to take the instance token
#[derive(Debug)]
pub enum InstanceLock<G> {
    /// This process owns the token; keep the guard alive
    Acquired(G),
    /// Another live process already holds it
    Duplicate,
}

impl<G> InstanceLock<G> {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, InstanceLock::Duplicate)
    }
}

/// Something that can take the single-instance token
pub trait InstanceGuard {
    type Held;

    fn acquire(&self) -> Result<InstanceLock<Self::Held>, StartupError>;
}

/// Build the token name from application and user names.
/// Anything outside `[A-Za-z0-9_-]` becomes `_` so the name is valid for
/// every platform's lock primitive.
pub fn token_name(app_name: &str, user_name: &str) -> String {
    format!("{}-{}", app_name, user_name)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Named system lock for the current user
#[derive(Clone, Debug)]
pub struct NamedInstanceGuard {
    name: String,
}

impl NamedInstanceGuard {
    /// Token for `app_name` and the current user
    pub fn for_current_user(app_name: &str) -> Self {
        Self::with_name(token_name(app_name, &whoami::username()))
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl InstanceGuard for NamedInstanceGuard {
    type Held = HeldInstance;

    fn acquire(&self) -> Result<InstanceLock<HeldInstance>, StartupError> {
        let instance = SingleInstance::new(&self.name)
            .map_err(|e| StartupError::InstanceToken(e.to_string()))?;

        if instance.is_single() {
            log::debug!("Instance token {} acquired", self.name);
            Ok(InstanceLock::Acquired(HeldInstance {
                name: self.name.clone(),
                _instance: instance,
            }))
        } else {
            log::warn!("Instance token {} already held", self.name);
            Ok(InstanceLock::Duplicate)
        }
    }
}

/// Owned instance token, released when the process exits
pub struct HeldInstance {
    name: String,
    _instance: SingleInstance,
}

impl fmt::Debug for HeldInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeldInstance").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_name(tag: &str) -> String {
        token_name(
            &format!("fastgh-test-{}-{}", tag, std::process::id()),
            "tester",
        )
    }

    #[test]
    fn test_token_name_is_sanitized() {
        assert_eq!(token_name("FastGH", "DOMAIN\\jo doe"), "FastGH-DOMAIN_jo_doe");
        assert_eq!(token_name("FastGH", "alice"), "FastGH-alice");
    }

    #[test]
    fn test_token_name_depends_on_user() {
        assert_ne!(token_name("FastGH", "alice"), token_name("FastGH", "bob"));
    }

    #[test]
    fn test_second_acquire_is_duplicate() {
        let guard = NamedInstanceGuard::with_name(unique_name("dup"));

        let first = guard.acquire().unwrap();
        assert!(matches!(first, InstanceLock::Acquired(_)));

        let second = guard.acquire().unwrap();
        assert!(second.is_duplicate());

        drop(first);
    }

    #[test]
    fn test_different_names_do_not_conflict() {
        let a = NamedInstanceGuard::with_name(unique_name("a"));
        let b = NamedInstanceGuard::with_name(unique_name("b"));

        let held_a = a.acquire().unwrap();
        let held_b = b.acquire().unwrap();
        assert!(!held_a.is_duplicate());
        assert!(!held_b.is_duplicate());
    }

    #[test]
    fn test_current_user_token_uses_app_prefix() {
        let guard = NamedInstanceGuard::for_current_user("FastGH");
        assert!(guard.name().starts_with("FastGH-"));
    }
}
