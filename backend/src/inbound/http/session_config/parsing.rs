//! Reads the session toggles and applies the build-mode leniency rules.

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError};

const FLAG_SPELLINGS: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_SPELLINGS: &str = "Strict|Lax|None";

/// Session toggles read from `env` under one build mode.
pub(super) struct Toggles<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<'a, E: Env> Toggles<'a, E> {
    pub(super) const fn new(env: &'a E, mode: BuildMode) -> Self {
        Self { env, mode }
    }

    pub(super) fn raw(&self, name: &str) -> Option<String> {
        self.env.string(name)
    }

    pub(super) fn is_debug(&self) -> bool {
        self.mode.is_debug()
    }

    /// Boolean toggle `name`. Debug builds fall back to `default` when it is
    /// absent or misspelt.
    pub(super) fn flag(&self, name: &'static str, default: bool) -> Result<bool, SessionConfigError> {
        let Some(value) = self.raw(name) else {
            return self.lenient(default, SessionConfigError::MissingEnv { name }, || {
                warn!(toggle = name, default, "session toggle not set; using default");
            });
        };
        match parse_flag(&value) {
            Some(flag) => Ok(flag),
            None => self.lenient(
                default,
                SessionConfigError::InvalidEnv {
                    name,
                    value: value.clone(),
                    expected: FLAG_SPELLINGS,
                },
                || warn!(toggle = name, value = %value, default, "invalid session toggle; using default"),
            ),
        }
    }

    /// `SameSite` policy. `None` needs a secure cookie outside debug builds.
    pub(super) fn same_site(&self, cookie_secure: bool) -> Result<SameSite, SessionConfigError> {
        let fallback = if self.is_debug() {
            SameSite::Lax
        } else {
            SameSite::Strict
        };
        let Some(value) = self.raw(SAMESITE_ENV) else {
            return self.lenient(
                fallback,
                SessionConfigError::MissingEnv { name: SAMESITE_ENV },
                || warn!("SESSION_SAMESITE not set; using default"),
            );
        };
        match parse_same_site(&value) {
            Some(SameSite::None) if !cookie_secure => self.lenient(
                SameSite::None,
                SessionConfigError::InsecureSameSiteNone,
                || warn!("SESSION_SAMESITE=None on an insecure cookie; browsers may drop it"),
            ),
            Some(policy) => Ok(policy),
            None => self.lenient(
                fallback,
                SessionConfigError::InvalidEnv {
                    name: SAMESITE_ENV,
                    value: value.clone(),
                    expected: SAMESITE_SPELLINGS,
                },
                || warn!(value = %value, "invalid SESSION_SAMESITE; using default"),
            ),
        }
    }

    /// In debug builds run `note` and keep `fallback`; otherwise fail with `error`.
    pub(super) fn lenient<T>(
        &self,
        fallback: T,
        error: SessionConfigError,
        note: impl FnOnce(),
    ) -> Result<T, SessionConfigError> {
        if self.is_debug() {
            note();
            Ok(fallback)
        } else {
            Err(error)
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
