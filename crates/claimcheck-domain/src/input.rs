//! Input resolution for the two form sections
//!
//! Each section (claims, sources) can be supplied as pasted text, as an
//! uploaded plain-text file, or both. Pasted text always wins when it is
//! non-empty; an upload is only decoded when it is actually used.

use std::fmt;
use std::string::FromUtf8Error;
use thiserror::Error;

/// File extension accepted for uploads
pub const ACCEPTED_EXTENSION: &str = "txt";

/// Which half of the form an input belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Section A: the claims to verify
    Claims,
    /// Section B: the reference sources
    Sources,
}

impl Section {
    /// Label used in the user message and in error reports
    pub fn label(&self) -> &'static str {
        match self {
            Section::Claims => "Section A",
            Section::Sources => "Section B",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while turning raw form input into section text
#[derive(Debug, Error)]
pub enum InputError {
    /// An uploaded file was not valid UTF-8
    #[error("{section} upload is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// Section the upload belonged to
        section: Section,
        /// Underlying decode failure
        #[source]
        source: FromUtf8Error,
    },

    /// An uploaded file did not carry the `.txt` extension
    #[error("{section} upload '{file_name}' is not a .txt file")]
    UnsupportedFileType {
        /// Section the upload belonged to
        section: Section,
        /// Name reported by the client
        file_name: String,
    },
}

/// Raw bytes of an uploaded file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Upload {
    /// File name as reported by the client, if any
    pub file_name: Option<String>,
    /// File content, read in full
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload without a file name
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: None,
            bytes: bytes.into(),
        }
    }

    /// Create an upload carrying the client-reported file name
    pub fn named(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            bytes: bytes.into(),
        }
    }

    /// True when the file has no content
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn check_type(&self, section: Section) -> Result<(), InputError> {
        let Some(name) = self.file_name.as_deref() else {
            return Ok(());
        };
        // Browsers send an empty name when no file was chosen
        if name.is_empty() {
            return Ok(());
        }

        let accepted = std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION));

        if accepted {
            Ok(())
        } else {
            Err(InputError::UnsupportedFileType {
                section,
                file_name: name.to_string(),
            })
        }
    }

    /// Decode the upload as strict UTF-8
    pub fn decode(&self, section: Section) -> Result<String, InputError> {
        self.check_type(section)?;
        String::from_utf8(self.bytes.clone())
            .map_err(|source| InputError::InvalidUtf8 { section, source })
    }
}

/// What the user supplied for one section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionInput {
    /// Text typed or pasted into the text area
    pub pasted: Option<String>,
    /// Uploaded file, if any
    pub upload: Option<Upload>,
}

impl SectionInput {
    /// Section with pasted text only
    pub fn pasted(text: impl Into<String>) -> Self {
        Self {
            pasted: Some(text.into()),
            upload: None,
        }
    }

    /// Section with an upload only
    pub fn uploaded(upload: Upload) -> Self {
        Self {
            pasted: None,
            upload: Some(upload),
        }
    }

    /// Attach an upload alongside whatever is already set
    pub fn with_upload(mut self, upload: Upload) -> Self {
        self.upload = Some(upload);
        self
    }

    fn pasted_text(&self) -> Option<&str> {
        self.pasted.as_deref().filter(|text| !text.is_empty())
    }

    fn usable_upload(&self) -> Option<&Upload> {
        self.upload.as_ref().filter(|upload| !upload.is_empty())
    }

    /// True when the section has effective content, without decoding anything
    pub fn has_content(&self) -> bool {
        self.pasted_text().is_some() || self.usable_upload().is_some()
    }
}

/// Resolve the effective text of one section
///
/// Non-empty pasted text is returned verbatim. Otherwise a non-empty upload
/// is decoded as UTF-8. Otherwise the section is absent (`Ok(None)`).
pub fn resolve_section(section: Section, input: &SectionInput) -> Result<Option<String>, InputError> {
    if let Some(text) = input.pasted_text() {
        return Ok(Some(text.to_string()));
    }

    match input.usable_upload() {
        Some(upload) => upload.decode(section).map(Some),
        None => Ok(None),
    }
}

/// Section A content; never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimText(String);

impl ClaimText {
    /// Wrap claim text, rejecting the empty string
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.is_empty()).then_some(Self(text))
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Section B content; never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceText(String);

impl SourceText {
    /// Wrap source text, rejecting the empty string
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.is_empty()).then_some(Self(text))
    }

    /// Borrow the text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the form holds at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Section A input
    pub claims: SectionInput,
    /// Section B input
    pub sources: SectionInput,
}

impl FormInput {
    /// Build form input from its two sections
    pub fn new(claims: SectionInput, sources: SectionInput) -> Self {
        Self { claims, sources }
    }

    /// Form input from two pasted strings
    pub fn from_text(claims: impl Into<String>, sources: impl Into<String>) -> Self {
        Self::new(SectionInput::pasted(claims), SectionInput::pasted(sources))
    }

    /// True when both sections have effective content
    pub fn is_complete(&self) -> bool {
        self.claims.has_content() && self.sources.has_content()
    }

    /// Resolve both sections
    ///
    /// Returns `Ok(None)` while either section is still missing. Uploads are
    /// only decoded once both sections are present, so a bad upload is not
    /// reported while the other half of the form is still empty.
    pub fn resolve(&self) -> Result<Option<(ClaimText, SourceText)>, InputError> {
        if !self.is_complete() {
            return Ok(None);
        }

        let claims = resolve_section(Section::Claims, &self.claims)?.and_then(ClaimText::new);
        let sources = resolve_section(Section::Sources, &self.sources)?.and_then(SourceText::new);

        Ok(claims.zip(sources))
    }
}
