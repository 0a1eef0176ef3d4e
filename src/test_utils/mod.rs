#![allow(missing_docs)]

pub(crate) mod fake_api;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod multipart;
pub(crate) mod samples;

pub(crate) use fake_api::FakeApi;
pub(crate) use html::{assert_valid_html, element_text, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_status_ok};
pub(crate) use multipart::must_make_multipart;
pub(crate) use samples::{sample_page, sample_record, sample_summary};
