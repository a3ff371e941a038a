//! Image upload from the item sell form.
//!
//! Picking files through the hidden file input adds one placeholder image
//! per accepted file, then uploads each file on its own. Once the handler
//! confirms, the placeholder shows the file read locally, so the image is
//! never downloaded back. A refused upload removes its placeholder.
//!
//! Each selected file becomes an [`UploadTask`]. Tasks share nothing but
//! the pictures container, so they may complete in any order and one
//! failure never affects another placeholder.

use crate::constants::{classes, ids};
use crate::dom::Renderer;
use crate::error::PageError;
use crate::service::{ImageService, LocalFile, is_image_mime};

/// A placeholder waiting for its file upload to complete.
#[derive(Debug, Clone)]
pub struct UploadTask<N, F> {
    /// Placeholder image in the pictures container
    pub placeholder: N,
    /// File being uploaded
    pub file: F,
}

/// How an upload task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Placeholder now shows the local file
    Previewed,
    /// Handler refused the file, placeholder removed
    Rejected,
    /// Upload succeeded but the file could not be read back, placeholder removed
    Unreadable,
}

/// Binds the "add picture" control, the hidden file input and the
/// pictures container.
#[derive(Debug, Clone)]
pub struct ImageUploader<N> {
    container: N,
    trigger: N,
    input: N,
}

impl<N: Clone> ImageUploader<N> {
    /// Resolve the pictures container, the add picture control and its input.
    pub fn bind<R>(page: &R) -> Result<Self, PageError>
    where
        R: Renderer<Node = N>,
    {
        Ok(Self {
            container: page.require_by_id(ids::PICTURES_DIV)?,
            trigger: page.require_by_id(ids::CLICK_TO_ADD_PICTURE)?,
            input: page.require_by_id(ids::INPUT_CLICK_TO_ADD_PICTURE)?,
        })
    }

    /// The visible "add picture" control.
    pub fn trigger(&self) -> &N {
        &self.trigger
    }

    /// The hidden file input.
    pub fn input(&self) -> &N {
        &self.input
    }

    /// Open the file picker by clicking the hidden input.
    ///
    /// The input sits inside the trigger, so the browser wiring must stop
    /// the input's click from bubbling back to it.
    pub fn open_picker<R>(&self, page: &R)
    where
        R: Renderer<Node = N>,
    {
        page.click(&self.input);
    }

    /// Insert a placeholder for every image file and return their tasks.
    ///
    /// Files whose MIME type is not `image/*` are skipped silently: no
    /// placeholder, no task, hence no request.
    pub fn accept_files<R, F>(&self, page: &R, files: Vec<F>) -> Vec<UploadTask<N, F>>
    where
        R: Renderer<Node = N>,
        F: LocalFile,
    {
        files
            .into_iter()
            .filter(|file| {
                let accepted = is_image_mime(&file.mime_type());
                if !accepted {
                    log::debug!(
                        "Skipping {} ({:?} is not an image)",
                        file.name(),
                        file.mime_type()
                    );
                }
                accepted
            })
            .map(|file| {
                let placeholder = page.create_image(classes::PICTURE, None);
                page.append_child(&self.container, &placeholder);
                UploadTask { placeholder, file }
            })
            .collect()
    }

    /// Upload one task's file and resolve its placeholder.
    pub async fn upload<R, S>(
        &self,
        page: &R,
        service: &S,
        task: UploadTask<N, S::File>,
    ) -> UploadOutcome
    where
        R: Renderer<Node = N>,
        S: ImageService,
    {
        let result = service.upload(&task.file).await;
        self.complete(page, task, result).await
    }

    /// Resolve a placeholder once its upload answered.
    pub async fn complete<R, F>(
        &self,
        page: &R,
        task: UploadTask<N, F>,
        result: Result<(), PageError>,
    ) -> UploadOutcome
    where
        R: Renderer<Node = N>,
        F: LocalFile,
    {
        if let Err(e) = result {
            log::warn!("Upload of {} failed: {e}", task.file.name());
            page.detach(&task.placeholder);
            return UploadOutcome::Rejected;
        }

        match task.file.read_data_url().await {
            Ok(data_url) => {
                page.set_attribute(&task.placeholder, "src", &data_url);
                log::debug!("Uploaded {}", task.file.name());
                UploadOutcome::Previewed
            }
            Err(e) => {
                log::warn!("{e}");
                page.detach(&task.placeholder);
                UploadOutcome::Unreadable
            }
        }
    }
}
