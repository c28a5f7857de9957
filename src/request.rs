//! Request descriptor assembly
//!
//! Turns caller parameters plus [`DownloadOptions`] defaults into a
//! [`DownloadRequest`]. Destination preparation (folder creation, stale file
//! removal) happens here, at build time rather than enqueue time, so that
//! every local failure surfaces before the engine is asked for anything.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::paths;
use crate::types::{DestinationKind, DownloadOptions, DownloadRequest, NotificationVisibility};

/// MIME type used when a submission does not name one
pub const DEFAULT_MIME_TYPE: &str = "*/*";

/// Build a [`DownloadRequest`] from caller parameters and defaults
///
/// The URL is validated first; nothing touches the filesystem for a URL the
/// engine could never fetch. The descriptor keeps the caller's URL string
/// verbatim, since that is what queued-URL checks compare against.
pub(crate) async fn build_request(
    config: &Config,
    url: &str,
    filename: &str,
    options: &DownloadOptions,
) -> Result<DownloadRequest> {
    url::Url::parse(url).map_err(|e| Error::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let mime_type = options
        .mime_type
        .clone()
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
    let sub_dir = options
        .sub_dir
        .clone()
        .unwrap_or_else(|| config.default_sub_dir.clone());

    let base = match options.destination {
        DestinationKind::Public => &config.public_dir,
        DestinationKind::Private => &config.private_dir,
    };
    let folder = base.join(&sub_dir);
    let target_path = paths::prepare_destination(&folder, filename).await?;

    let visibility = if options.notify_on_complete {
        NotificationVisibility::VisibleNotifyCompleted
    } else {
        NotificationVisibility::Visible
    };

    Ok(DownloadRequest {
        url: url.to_string(),
        title: filename.to_string(),
        mime_type,
        destination: options.destination,
        sub_dir,
        target_path,
        visibility,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            public_dir: temp_dir.path().join("public"),
            private_dir: temp_dir.path().join("private"),
            default_sub_dir: "Downloads".to_string(),
        }
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let request = build_request(
            &config,
            "https://example.com/file.bin",
            "file.bin",
            &DownloadOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(request.mime_type, DEFAULT_MIME_TYPE);
        assert_eq!(request.sub_dir, "Downloads");
        assert_eq!(request.destination, DestinationKind::Public);
        assert_eq!(
            request.visibility,
            NotificationVisibility::VisibleNotifyCompleted
        );
        assert_eq!(
            request.target_path,
            temp_dir.path().join("public").join("Downloads").join("file.bin")
        );
        assert_eq!(request.title, "file.bin");
    }

    #[tokio::test]
    async fn test_private_destination_uses_private_base() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let options = DownloadOptions {
            destination: DestinationKind::Private,
            sub_dir: Some("cache".to_string()),
            notify_on_complete: false,
            ..Default::default()
        };

        let request = build_request(&config, "https://example.com/f", "f.dat", &options)
            .await
            .unwrap();

        assert_eq!(
            request.target_path,
            temp_dir.path().join("private").join("cache").join("f.dat")
        );
        assert_eq!(request.visibility, NotificationVisibility::Visible);
        assert!(
            temp_dir.path().join("private").join("cache").is_dir(),
            "destination folder must exist after a successful build"
        );
    }

    #[tokio::test]
    async fn test_stale_file_removed_at_build_time() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let folder = temp_dir.path().join("public").join("Downloads");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("file.bin"), "stale").unwrap();

        build_request(
            &config,
            "https://example.com/file.bin",
            "file.bin",
            &DownloadOptions::default(),
        )
        .await
        .unwrap();

        assert!(!folder.join("file.bin").exists());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_side_effect() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let result = build_request(
            &config,
            "not a url",
            "file.bin",
            &DownloadOptions::default(),
        )
        .await;

        match result {
            Err(Error::InvalidUrl { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
        assert!(
            !temp_dir.path().join("public").exists(),
            "no folder may be created for an unparseable URL"
        );
    }

    #[tokio::test]
    async fn test_url_kept_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        // Url::parse would normalize this to "https://example.com/";
        // the descriptor must keep the caller's exact string
        let request = build_request(
            &config,
            "https://example.com",
            "file.bin",
            &DownloadOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(request.url, "https://example.com");
    }
}
