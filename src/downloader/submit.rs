//! Submission variants and registration.

use std::sync::atomic::Ordering;

use crate::error::{Error, Result};
use crate::handle::DownloadHandle;
use crate::request;
use crate::types::{DestinationKind, DownloadOptions, Event};

use super::SystemDownloader;

impl SystemDownloader {
    /// Submit a download
    ///
    /// Validates the URL, prepares the destination (folder creation and
    /// stale file removal, both fatal here before the engine sees anything),
    /// hands the request to the engine and registers the assigned
    /// identifier. The returned handle delivers the download's single
    /// terminal outcome to every subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse, the destination cannot be
    /// prepared, the engine rejects the request, or shutdown has begun.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use system_dl::{DownloadOptions, SystemDownloader};
    /// # async fn example(downloader: SystemDownloader) -> system_dl::Result<()> {
    /// let mut handle = downloader
    ///     .download(
    ///         "https://example.com/report.pdf",
    ///         "report.pdf",
    ///         DownloadOptions::default(),
    ///     )
    ///     .await?;
    /// let local_path = handle.wait().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn download(
        &self,
        url: &str,
        filename: &str,
        options: DownloadOptions,
    ) -> Result<DownloadHandle> {
        if !self.accepting_new.load(Ordering::SeqCst) {
            return Err(Error::ShuttingDown);
        }

        let request = request::build_request(&self.config, url, filename, &options).await?;
        let id = self.engine.enqueue(&request)?;
        let handle = self.registry.register(id, url);

        tracing::info!(
            download_id = id.get(),
            url = %url,
            target = %request.target_path.display(),
            "download enqueued"
        );
        self.emit_event(Event::Queued {
            id,
            url: url.to_string(),
        });

        Ok(handle)
    }

    /// Download into the public area under the default sub-directory
    pub async fn download_to_public(
        &self,
        url: &str,
        filename: &str,
        notify_on_complete: bool,
    ) -> Result<DownloadHandle> {
        self.download(
            url,
            filename,
            DownloadOptions {
                notify_on_complete,
                ..Default::default()
            },
        )
        .await
    }

    /// Download into the public area with an explicit MIME type
    pub async fn download_to_public_with_mime(
        &self,
        url: &str,
        filename: &str,
        mime_type: &str,
        notify_on_complete: bool,
    ) -> Result<DownloadHandle> {
        self.download(
            url,
            filename,
            DownloadOptions {
                mime_type: Some(mime_type.to_string()),
                notify_on_complete,
                ..Default::default()
            },
        )
        .await
    }

    /// Download into an explicit sub-directory of the public area
    pub async fn download_to_public_in(
        &self,
        url: &str,
        filename: &str,
        sub_dir: &str,
        mime_type: &str,
        notify_on_complete: bool,
    ) -> Result<DownloadHandle> {
        self.download(
            url,
            filename,
            DownloadOptions {
                mime_type: Some(mime_type.to_string()),
                sub_dir: Some(sub_dir.to_string()),
                notify_on_complete,
                ..Default::default()
            },
        )
        .await
    }

    /// Download into a sub-directory of the application-private area
    pub async fn download_to_private(
        &self,
        url: &str,
        filename: &str,
        sub_dir: &str,
        mime_type: &str,
        notify_on_complete: bool,
    ) -> Result<DownloadHandle> {
        self.download(
            url,
            filename,
            DownloadOptions {
                mime_type: Some(mime_type.to_string()),
                sub_dir: Some(sub_dir.to_string()),
                destination: DestinationKind::Private,
                notify_on_complete,
            },
        )
        .await
    }
}
