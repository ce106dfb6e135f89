//! The File resource.
//!
//! Files are uploaded once, as `multipart/form-data`, and never modified
//! afterwards; the API offers `create`, `retrieve` and `list` only.

use serde::{Deserialize, Serialize};

use crate::Metadata;
use crate::expandable::Expandable;
use crate::list::{HasId, List, RangeQuery};
use crate::timestamp::UnixTimestamp;
use crate::validate::{InvalidParameters, Validate, check_limit};

open_string_enum! {
    /// The purpose of an uploaded file.
    pub enum FilePurpose {
        /// A business icon.
        BusinessIcon = "business_icon",
        /// A business logo.
        BusinessLogo = "business_logo",
        /// A customer signature.
        CustomerSignature = "customer_signature",
        /// Evidence submitted for a dispute.
        DisputeEvidence = "dispute_evidence",
        /// Output of a financial report run.
        FinanceReportRun = "finance_report_run",
        /// An identity document.
        IdentityDocument = "identity_document",
        /// A PCI compliance document.
        PciDocument = "pci_document",
        /// Output of a scheduled Sigma query.
        SigmaScheduledQuery = "sigma_scheduled_query",
        /// A user-uploaded tax document.
        TaxDocumentUserUpload = "tax_document_user_upload",
    }
}

string_enum! {
    /// Purpose filter accepted by the list endpoint.
    pub enum FileListPurpose {
        /// A business icon.
        BusinessIcon = "business_icon",
        /// A business logo.
        BusinessLogo = "business_logo",
        /// A customer signature.
        CustomerSignature = "customer_signature",
        /// Evidence submitted for a dispute.
        DisputeEvidence = "dispute_evidence",
        /// Output of a financial report run.
        FinanceReportRun = "finance_report_run",
        /// An identity document.
        IdentityDocument = "identity_document",
        /// A PCI compliance document.
        PciDocument = "pci_document",
        /// Output of a scheduled Sigma query.
        SigmaScheduledQuery = "sigma_scheduled_query",
        /// A user-uploaded tax document.
        TaxDocumentUserUpload = "tax_document_user_upload",
    }
}

impl From<FileListPurpose> for FilePurpose {
    fn from(purpose: FileListPurpose) -> Self {
        Self::from(purpose.as_str())
    }
}

/// An uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique identifier for the object.
    pub id: String,

    /// Always `"file"`.
    #[serde(default = "file_object")]
    pub object: String,

    /// Time at which the object was created.
    pub created: UnixTimestamp,

    /// A filename suitable for saving to a filesystem.
    #[serde(default)]
    pub filename: Option<String>,

    /// Links that can be shared to download the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<List<FileLink>>,

    /// The purpose of the file.
    pub purpose: FilePurpose,

    /// The size in bytes of the file.
    pub size: u64,

    /// A user-friendly title for the document.
    #[serde(default)]
    pub title: Option<String>,

    /// The type of the file (e.g. `csv`, `pdf`, `jpg`, `png`).
    #[serde(rename = "type", default)]
    pub file_type: Option<String>,

    /// Download URL, usable with a live secret key.
    #[serde(default)]
    pub url: Option<String>,
}

fn file_object() -> String {
    "file".to_owned()
}

impl HasId for File {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A shareable link to a [`File`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLink {
    /// Unique identifier for the object.
    pub id: String,

    /// Always `"file_link"`.
    pub object: String,

    /// Time at which the object was created.
    pub created: UnixTimestamp,

    /// Whether this link is already expired.
    #[serde(default)]
    pub expired: bool,

    /// Time at which the link expires.
    #[serde(default)]
    pub expires_at: Option<UnixTimestamp>,

    /// The file the link points to.
    pub file: Expandable<File>,

    /// `true` in live mode, `false` in test mode.
    #[serde(default)]
    pub livemode: bool,

    /// Attached key-value pairs.
    #[serde(default)]
    pub metadata: Metadata,

    /// The publicly accessible URL to download the file.
    #[serde(default)]
    pub url: Option<String>,
}

impl HasId for FileLink {
    fn id(&self) -> &str {
        &self.id
    }
}

/// File contents to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    /// Name reported for the uploaded part.
    pub filename: String,
    /// MIME type of the contents, if known.
    pub content_type: Option<String>,
    /// Raw contents.
    pub data: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload from a filename and its contents.
    #[must_use]
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Sets the MIME type of the contents.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Parameters for uploading a file.
///
/// The [`FileUpload`] travels as the `file` part of a multipart body; the
/// remaining fields are encoded as text parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileCreateParams {
    /// The file to upload.
    #[serde(skip)]
    pub file: FileUpload,

    /// The purpose of the uploaded file.
    pub purpose: FilePurpose,

    /// Optional parameters to create a file link for the new file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_link_data: Option<FileLinkData>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

impl FileCreateParams {
    /// Creates upload parameters for `file` with the given purpose.
    #[must_use]
    pub const fn new(file: FileUpload, purpose: FilePurpose) -> Self {
        Self {
            file,
            purpose,
            file_link_data: None,
            expand: Vec::new(),
        }
    }

    /// Requests a file link alongside the upload.
    #[must_use]
    pub fn with_file_link(mut self, data: FileLinkData) -> Self {
        self.file_link_data = Some(data);
        self
    }
}

impl Validate for FileCreateParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        if self.file.data.is_empty() {
            return Err(InvalidParameters::new("file", "file contents must not be empty"));
        }
        if self.file.filename.trim().is_empty() {
            return Err(InvalidParameters::new("file", "filename must not be empty"));
        }
        Ok(())
    }
}

/// File link created together with an upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileLinkData {
    /// Set to `true` to create a file link for the newly created file.
    pub create: bool,

    /// A future timestamp after which the link will no longer be usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<UnixTimestamp>,

    /// Key-value pairs attached to the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Parameters for retrieving a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileRetrieveParams {
    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
}

impl Validate for FileRetrieveParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        Ok(())
    }
}

/// Parameters for listing files, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileListParams {
    /// Filter on creation time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<RangeQuery>,

    /// Cursor: return objects created before this object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,

    /// Fields to expand in the response.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,

    /// Page size, between 1 and 100 (default 10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,

    /// Only return files with this purpose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<FileListPurpose>,

    /// Cursor: return objects created after this object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
}

impl_paginate!(FileListParams);

impl Validate for FileListParams {
    fn validate(&self) -> Result<(), InvalidParameters> {
        check_limit(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form;
    use serde_json::json;

    #[test]
    fn test_file_deserialize() {
        let file: File = serde_json::from_value(json!({
            "id": "file_1",
            "object": "file",
            "created": 1_575_000_000,
            "filename": "evidence.pdf",
            "purpose": "dispute_evidence",
            "size": 9863,
            "title": null,
            "type": "pdf",
            "url": "https://files.stripe.com/v1/files/file_1/contents"
        }))
        .unwrap();
        assert_eq!(file.purpose, FilePurpose::DisputeEvidence);
        assert_eq!(file.file_type.as_deref(), Some("pdf"));
        assert_eq!(file.size, 9863);
        assert!(file.title.is_none());
        assert!(file.links.is_none());
    }

    #[test]
    fn test_unknown_purpose_is_tolerated() {
        let file: File = serde_json::from_value(json!({
            "id": "file_2",
            "object": "file",
            "created": 1_575_000_000,
            "filename": null,
            "purpose": "account_requirement",
            "size": 1,
            "title": null,
            "type": null,
            "url": null
        }))
        .unwrap();
        assert!(file.purpose.is_unknown());
        assert_eq!(
            serde_json::to_value(&file).unwrap()["purpose"],
            json!("account_requirement")
        );
    }

    #[test]
    fn test_list_purpose_is_closed() {
        assert!("account_requirement".parse::<FileListPurpose>().is_err());
        assert_eq!(
            "pci_document".parse::<FileListPurpose>().unwrap(),
            FileListPurpose::PciDocument
        );
        assert_eq!(FileListPurpose::ALL.len(), FilePurpose::KNOWN.len());
    }

    #[test]
    fn test_create_params_skip_file_body() {
        let params = FileCreateParams::new(
            FileUpload::new("logo.png", vec![1, 2, 3]),
            FilePurpose::BusinessLogo,
        )
        .with_file_link(FileLinkData {
            create: true,
            ..FileLinkData::default()
        });
        let mut pairs = form::encode(&params).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("file_link_data[create]".to_owned(), "true".to_owned()),
                ("purpose".to_owned(), "business_logo".to_owned()),
            ]
        );
    }

    #[test]
    fn test_empty_upload_is_rejected() {
        let params = FileCreateParams::new(FileUpload::new("a.txt", Vec::new()), FilePurpose::PciDocument);
        assert_eq!(params.validate().unwrap_err().param, "file");
    }

    #[test]
    fn test_list_params_encode() {
        let params = FileListParams {
            limit: Some(3),
            purpose: Some(FileListPurpose::DisputeEvidence),
            created: Some(RangeQuery::since(UnixTimestamp::from_secs(100))),
            ..FileListParams::default()
        };
        let pairs = form::encode(&params).unwrap();
        assert!(pairs.contains(&("created[gte]".to_owned(), "100".to_owned())));
        assert!(pairs.contains(&("limit".to_owned(), "3".to_owned())));
        assert!(pairs.contains(&("purpose".to_owned(), "dispute_evidence".to_owned())));
        assert!(params.validate().is_ok());
    }
}
