//! Social share links for the petition page.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;

pub const SHARE_TITLE: &str =
    "Dukung deklarasi nasional 'Aparatur Pemerintah Desa ASN 2026'! Tandatangani sekarang:";

/// Same set JavaScript's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub url: String,
    pub whatsapp: String,
    pub facebook: String,
    pub twitter: String,
}

impl ShareLinks {
    pub fn for_url(url: &str) -> Self {
        let encoded_url = encode_uri_component(url);
        let encoded_title = encode_uri_component(SHARE_TITLE);
        Self {
            url: url.to_string(),
            whatsapp: format!(
                "https://api.whatsapp.com/send?text={encoded_title}%20{encoded_url}"
            ),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={encoded_url}"),
            twitter: format!(
                "https://twitter.com/intent/tweet?url={encoded_url}&text={encoded_title}"
            ),
        }
    }
}
