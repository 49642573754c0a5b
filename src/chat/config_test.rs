use super::*;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers hold `ENV_LOCK`.
unsafe fn clear_chat_env() {
    unsafe {
        std::env::remove_var("CHAT_API_KEY_ENV");
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GEMINI_MODEL");
        std::env::remove_var("GEMINI_BASE_URL");
        std::env::remove_var("CHAT_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("CHAT_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("__TEST_CHAT_KEY__");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_chat_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
    }

    let cfg = ChatConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        ChatTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );

    unsafe { clear_chat_env() };
}

#[test]
fn from_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_chat_env();
        std::env::set_var("CHAT_API_KEY_ENV", "__TEST_CHAT_KEY__");
        std::env::set_var("__TEST_CHAT_KEY__", "k2");
        std::env::set_var("GEMINI_MODEL", "gemini-2.0-pro");
        std::env::set_var("GEMINI_BASE_URL", "http://localhost:9999/v1beta/");
        std::env::set_var("CHAT_REQUEST_TIMEOUT_SECS", "30");
        std::env::set_var("CHAT_CONNECT_TIMEOUT_SECS", "2");
    }

    let cfg = ChatConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "k2");
    assert_eq!(cfg.model, "gemini-2.0-pro");
    assert_eq!(cfg.base_url, "http://localhost:9999/v1beta");
    assert_eq!(cfg.timeouts, ChatTimeouts { request_secs: 30, connect_secs: 2 });

    unsafe { clear_chat_env() };
}

#[test]
fn from_env_missing_key() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_chat_env() };

    let err = ChatConfig::from_env().unwrap_err();
    assert!(matches!(err, ChatError::MissingApiKey { ref var } if var == "GEMINI_API_KEY"));
}

#[test]
fn from_env_rejects_bad_timeout() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_chat_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
        std::env::set_var("CHAT_REQUEST_TIMEOUT_SECS", "soon");
    }

    assert!(matches!(ChatConfig::from_env(), Err(ChatError::ConfigParse(_))));

    unsafe { clear_chat_env() };
}
