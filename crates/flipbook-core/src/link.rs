//! Shareable viewer links
//!
//! Links live in the URL fragment:
//! - `#/flipbook/{id}` points at a stored catalog entry
//! - `#/view?pdf=<url>&title=<text>` points straight at a remote PDF

use crate::types::*;

const STORED_PREFIX: &str = "/flipbook/";
const VIEW_PREFIX: &str = "/view";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareLink {
    Stored {
        id: String,
    },
    Remote {
        pdf_url: String,
        title: Option<String>,
    },
}

impl ShareLink {
    /// Parse a fragment, with or without the leading `#`
    pub fn parse(fragment: &str) -> Result<Self> {
        let fragment = fragment.trim();
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

        if let Some(id) = fragment.strip_prefix(STORED_PREFIX) {
            let id = id.trim_end_matches('/');
            if id.is_empty() || id.contains('/') {
                return Err(FlipbookError::InvalidLink(format!(
                    "Malformed flipbook id in '{}'",
                    fragment
                )));
            }
            let id = decode(id)?;
            return Ok(ShareLink::Stored { id });
        }

        if let Some(rest) = fragment.strip_prefix(VIEW_PREFIX) {
            let query = rest.strip_prefix('?').ok_or_else(|| {
                FlipbookError::InvalidLink("View link has no query string".to_string())
            })?;

            let mut pdf_url = None;
            let mut title = None;
            for pair in query.split('&').filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                match key {
                    "pdf" => pdf_url = Some(decode(value)?),
                    "title" => title = Some(decode(value)?).filter(|t| !t.is_empty()),
                    _ => {}
                }
            }

            let pdf_url = pdf_url.filter(|u| !u.is_empty()).ok_or_else(|| {
                FlipbookError::InvalidLink("View link is missing the pdf parameter".to_string())
            })?;
            return Ok(ShareLink::Remote { pdf_url, title });
        }

        Err(FlipbookError::InvalidLink(format!(
            "Unrecognized link '{}'",
            fragment
        )))
    }

    /// Fragment form, including the leading `#`
    pub fn to_fragment(&self) -> String {
        match self {
            ShareLink::Stored { id } => {
                format!("#{}{}", STORED_PREFIX, urlencoding::encode(id))
            }
            ShareLink::Remote { pdf_url, title } => {
                let mut fragment =
                    format!("#{}?pdf={}", VIEW_PREFIX, urlencoding::encode(pdf_url));
                if let Some(title) = title {
                    fragment.push_str("&title=");
                    fragment.push_str(&urlencoding::encode(title));
                }
                fragment
            }
        }
    }

    /// Full viewer URL: `base` with any existing fragment replaced
    pub fn viewer_url(&self, base: &str) -> String {
        let base = base.split('#').next().unwrap_or(base);
        format!("{}{}", base, self.to_fragment())
    }

    /// Document source this link opens, if it can be resolved without the catalog
    pub fn source(&self) -> Option<DocumentSource> {
        match self {
            ShareLink::Remote { pdf_url, .. } => Some(DocumentSource::Url(pdf_url.clone())),
            ShareLink::Stored { .. } => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ShareLink::Remote { title, .. } => title.as_deref(),
            ShareLink::Stored { .. } => None,
        }
    }
}

impl From<&FlipbookRecord> for ShareLink {
    fn from(record: &FlipbookRecord) -> Self {
        ShareLink::Stored {
            id: record.id.clone(),
        }
    }
}

fn decode(value: &str) -> Result<String> {
    // Query strings may encode spaces as '+'
    let value = value.replace('+', " ");
    urlencoding::decode(&value)
        .map(|s| s.into_owned())
        .map_err(|e| FlipbookError::InvalidLink(format!("Bad percent-encoding: {}", e)))
}
