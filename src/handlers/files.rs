//! Binary download responses

use axum::{
    body::Body,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use crate::models::StoredFile;

/// How the browser should present a download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Content type only (images)
    Plain,
    /// `inline; filename="..."` (resumes)
    InlineNamed,
}

/// Serve a stored file with its recorded content type
pub fn file_response(file: StoredFile, disposition: Disposition) -> Response {
    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let mut response = Body::from(file.data).into_response();
    response.headers_mut().insert(header::CONTENT_TYPE, content_type);

    if disposition == Disposition::InlineNamed {
        let value = format!("inline; filename=\"{}\"", header_safe(&file.filename));
        if let Ok(value) = HeaderValue::from_str(&value) {
            response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
        }
    }

    response
}

/// Quotes and non-ASCII bytes cannot appear in a quoted header parameter
fn header_safe(filename: &str) -> String {
    filename
        .chars()
        .map(|c| if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(name: &str) -> StoredFile {
        StoredFile {
            data: b"%PDF-1.7".to_vec(),
            content_type: "application/pdf".to_string(),
            filename: name.to_string(),
        }
    }

    #[test]
    fn test_inline_resume_headers() {
        let response = file_response(resume("Ada Lovelace CV.pdf"), Disposition::InlineNamed);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "inline; filename=\"Ada Lovelace CV.pdf\""
        );
    }

    #[test]
    fn test_plain_image_has_no_disposition() {
        let mut photo = resume("me.png");
        photo.content_type = "image/png".to_string();
        let response = file_response(photo, Disposition::Plain);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    }

    #[test]
    fn test_unsafe_filename_characters_replaced() {
        assert_eq!(header_safe("a\"b\\c\u{e9}.pdf"), "a_b_c_.pdf");
    }
}
