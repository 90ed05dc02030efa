use crate::assets::LogoAsset;
use crate::debug::{DebugLogger, json_escape};
use std::path::{Path, PathBuf};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of looking for the branding image. Never an error: a report
/// renders without its logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoFetch {
    Cached(PathBuf),
    Downloaded(PathBuf),
    Unavailable(String),
}

impl LogoFetch {
    pub fn path(&self) -> Option<&Path> {
        match self {
            LogoFetch::Cached(path) | LogoFetch::Downloaded(path) => Some(path),
            LogoFetch::Unavailable(_) => None,
        }
    }
}

/// Returns the cached logo when `cache_path` already holds one, otherwise
/// downloads `url` once and stores it there.
pub fn fetch_logo(url: &str, cache_path: &Path, debug: Option<&DebugLogger>) -> LogoFetch {
    let outcome = fetch_logo_inner(url, cache_path);
    if let Some(logger) = debug {
        let (status, detail) = match &outcome {
            LogoFetch::Cached(path) => ("cached", path.display().to_string()),
            LogoFetch::Downloaded(path) => ("downloaded", path.display().to_string()),
            LogoFetch::Unavailable(reason) => ("unavailable", reason.clone()),
        };
        logger.log_json(&format!(
            "{{\"type\":\"asset.logo_fetch\",\"status\":\"{}\",\"url\":\"{}\",\"detail\":\"{}\"}}",
            status,
            json_escape(url),
            json_escape(&detail)
        ));
    }
    outcome
}

fn fetch_logo_inner(url: &str, cache_path: &Path) -> LogoFetch {
    if cache_path.is_file() && LogoAsset::from_path(cache_path).is_ok() {
        return LogoFetch::Cached(cache_path.to_path_buf());
    }

    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(FETCH_TIMEOUT))
        .build()
        .into();
    let mut response = match agent.get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::StatusCode(code)) => {
            return LogoFetch::Unavailable(format!("http status {code}"));
        }
        Err(err) => return LogoFetch::Unavailable(err.to_string()),
    };
    let bytes = match response.body_mut().read_to_vec() {
        Ok(bytes) => bytes,
        Err(err) => return LogoFetch::Unavailable(err.to_string()),
    };
    if let Err(err) = LogoAsset::from_bytes(&bytes) {
        return LogoFetch::Unavailable(err.to_string());
    }
    if let Some(parent) = cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(err) = std::fs::create_dir_all(parent) {
            return LogoFetch::Unavailable(err.to_string());
        }
    }
    match std::fs::write(cache_path, &bytes) {
        Ok(()) => LogoFetch::Downloaded(cache_path.to_path_buf()),
        Err(err) => LogoFetch::Unavailable(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::png_bytes;
    use crate::debug::tests::temp_log_path;

    #[test]
    fn valid_cache_file_skips_the_network() {
        let path = temp_log_path("logo_cache").with_extension("png");
        std::fs::write(&path, png_bytes(2, 2, 255)).unwrap();
        let outcome = fetch_logo("http://127.0.0.1:1/logo.png", &path, None);
        let _ = std::fs::remove_file(&path);
        assert_eq!(outcome, LogoFetch::Cached(path.clone()));
        assert_eq!(outcome.path(), Some(path.as_path()));
    }

    #[test]
    fn unreachable_host_is_unavailable() {
        let path = temp_log_path("logo_missing").with_extension("png");
        let outcome = fetch_logo("http://127.0.0.1:1/logo.png", &path, None);
        assert!(matches!(outcome, LogoFetch::Unavailable(_)));
        assert_eq!(outcome.path(), None);
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_cache_is_not_reused() {
        let path = temp_log_path("logo_corrupt").with_extension("png");
        std::fs::write(&path, b"garbage").unwrap();
        let log_path = temp_log_path("logo_fetch_log");
        let logger = DebugLogger::new(&log_path).unwrap();
        let outcome = fetch_logo("http://127.0.0.1:1/logo.png", &path, Some(&logger));
        logger.flush();
        let _ = std::fs::remove_file(&path);
        let log = std::fs::read_to_string(&log_path).unwrap();
        let _ = std::fs::remove_file(&log_path);
        assert!(matches!(outcome, LogoFetch::Unavailable(_)));
        assert!(log.contains("\"status\":\"unavailable\""));
    }
}
