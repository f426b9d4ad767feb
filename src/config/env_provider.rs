use std::collections::HashMap;

/// Trait for providing environment variable access
///
/// Settings and secrets read through this trait so tests can supply values
/// without touching the process environment.
pub trait EnvironmentProvider: Send + Sync {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production environment provider that reads from system environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Environment provider backed by a fixed set of variables
#[derive(Debug, Clone, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        for (key, value) in vars {
            self.vars.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_provider() {
        let provider = SystemEnvironment;

        unsafe {
            std::env::set_var("HOSPITAL_TEST_VAR_12345", "test_value");
        }

        assert_eq!(
            provider.get_var("HOSPITAL_TEST_VAR_12345"),
            Some("test_value".to_string())
        );
        assert_eq!(provider.get_var("HOSPITAL_MISSING_VAR_98765"), None);

        unsafe {
            std::env::remove_var("HOSPITAL_TEST_VAR_12345");
        }
    }

    #[test]
    fn test_mock_environment_later_values_win() {
        let provider = MockEnvironment::empty()
            .with_vars(&[("PORT", "3000"), ("HOST", "127.0.0.1")])
            .with_var("PORT", "8080");

        assert_eq!(provider.get_var("PORT"), Some("8080".to_string()));
        assert_eq!(provider.get_var("HOST"), Some("127.0.0.1".to_string()));
        assert_eq!(provider.get_var("DATABASE_URL"), None);
    }
}
