
use std::env;

use tempfile::TempDir;

pub(crate) const TEST_SIGNING_SECRET: &str = "whsec_MfKQ9r8GKYqrTwjUPD8ILPZIo2LaLaSw";
pub(crate) const TEST_PROVIDER_KEY: &str = "sk_test_123";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Temp config directory with IDS_CONFIG_DIR pointing at it and the
/// unprefixed secret variables cleared
pub(crate) struct TestConfigDir {
    pub(crate) temp: TempDir,
    _guards: Vec<EnvGuard>,
}

pub(crate) fn setup_config_dir() -> TestConfigDir {
    let temp = TempDir::new().unwrap();
    let guards = vec![
        EnvGuard::set("IDS_CONFIG_DIR", temp.path().to_str().unwrap()),
        EnvGuard::remove("WEBHOOK_SECRET"),
        EnvGuard::remove("CLERK_SECRET_KEY"),
        EnvGuard::remove("IDS_WEBHOOK_SIGNING_SECRET"),
        EnvGuard::remove("IDS_PROVIDER_SECRET_KEY"),
    ];
    TestConfigDir {
        temp,
        _guards: guards,
    }
}

/// Config dir plus both required secrets set through the environment
pub(crate) fn setup_valid_config_dir() -> (TestConfigDir, EnvGuard, EnvGuard) {
    let dir = setup_config_dir();
    let secret = EnvGuard::set("IDS_WEBHOOK_SIGNING_SECRET", TEST_SIGNING_SECRET);
    let key = EnvGuard::set("IDS_PROVIDER_SECRET_KEY", TEST_PROVIDER_KEY);
    (dir, secret, key)
}
