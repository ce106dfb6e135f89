//! `v1/files`: upload, retrieve and list files. Files are immutable.

use futures_util::Stream;
use reqwest::multipart::{Form, Part};
use stripe_types::file::{File, FileCreateParams, FileListParams, FileRetrieveParams};
use stripe_types::form;
use stripe_types::list::List;
use stripe_types::validate::{InvalidParameters, Validate, check_id};

use crate::client::{Client, Host};
use crate::error::Error;
use crate::options::RequestOptions;
use crate::pagination::paginate;

/// Handle to the Files resource.
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    client: &'a Client,
}

impl<'a> Files<'a> {
    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Uploads a file to the upload host as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty upload, or any
    /// transport or API error.
    pub async fn create(
        &self,
        params: &FileCreateParams,
        options: &RequestOptions,
    ) -> Result<File, Error> {
        params.validate()?;
        let mut pairs = form::encode(params)?;
        form::append_expand(&mut pairs, &options.expand);

        let mut part =
            Part::bytes(params.file.data.clone()).file_name(params.file.filename.clone());
        if let Some(content_type) = &params.file.content_type {
            part = part.mime_str(content_type).map_err(|e| {
                InvalidParameters::new("file", format!("invalid content type: {e}"))
            })?;
        }
        let body = pairs
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value))
            .part("file", part);

        self.client
            .post_multipart(Host::Files, &["v1", "files"], "POST v1/files", body, options)
            .await
    }

    /// Retrieves a file by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for an empty id, or any
    /// transport or API error.
    pub async fn retrieve(
        &self,
        id: &str,
        params: &FileRetrieveParams,
        options: &RequestOptions,
    ) -> Result<File, Error> {
        check_id(id)?;
        self.client
            .get(&["v1", "files", id], "GET v1/files/{id}", params, options)
            .await
    }

    /// Returns one page of files, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] for a `limit` outside `[1, 100]`,
    /// or any transport or API error.
    pub async fn list(
        &self,
        params: &FileListParams,
        options: &RequestOptions,
    ) -> Result<List<File>, Error> {
        self.client
            .get(&["v1", "files"], "GET v1/files", params, options)
            .await
    }

    /// Streams every file matching `params`, fetching pages as needed.
    pub fn list_auto(
        self,
        params: FileListParams,
        options: RequestOptions,
    ) -> impl Stream<Item = Result<File, Error>> + 'a {
        paginate(params, move |page: FileListParams| {
            let options = options.clone();
            async move { self.list(&page, &options).await }
        })
    }
}
