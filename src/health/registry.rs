use super::checks::HealthCheck;
use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("health check `{0}` is already registered")]
    DuplicateName(String),
}

#[derive(Clone)]
pub struct NamedCheck {
    pub name: String,
    pub check: Arc<dyn HealthCheck>,
}

/// Named set of health checks, iterated in registration order.
///
/// Filled once during startup, then shared read-only between workers.
#[derive(Clone, Default)]
pub struct HealthRegistry {
    checks: IndexMap<String, NamedCheck>,
}

impl HealthRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C>(&mut self, name: impl Into<String>, check: C) -> Result<(), RegistrationError>
    where
        C: HealthCheck + 'static,
    {
        self.register_arc(name, Arc::new(check))
    }

    pub fn register_arc(
        &mut self,
        name: impl Into<String>,
        check: Arc<dyn HealthCheck>,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        if self.checks.contains_key(&name) {
            return Err(RegistrationError::DuplicateName(name));
        }

        tracing::debug!(check = %name, "Registered health check");
        self.checks.insert(name.clone(), NamedCheck { name, check });
        Ok(())
    }

    pub fn all(&self) -> impl Iterator<Item = &NamedCheck> {
        self.checks.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.checks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
