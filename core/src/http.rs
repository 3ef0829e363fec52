//! Wire encodings for endpoint calls.
//!
//! A call leaves the client as an `HttpRequest` whose body is already
//! encoded: query string for GET, url-encoded form for POST, multipart for
//! file uploads. `UreqSession` sends it as-is and hands back an
//! `HttpResponse` for the response shapes to map.
//!
//! Requests own their data so they can cross into `spawn_blocking`.

use uuid::Uuid;

use crate::params::Params;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A file attached to a multipart POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub contents: Vec<u8>,
    /// Form field the file is submitted under (the content-disposition name).
    pub field: String,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// GET with `params` appended as the query string.
    pub fn get(url: &str, params: &Params) -> Self {
        let url = if params.is_empty() {
            url.to_string()
        } else {
            let separator = if url.contains('?') { '&' } else { '?' };
            format!("{url}{separator}{}", params.to_form())
        };
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with `params` as a url-encoded form body.
    pub fn form(url: &str, params: &Params) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: vec![(
                "content-type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: Some(params.to_form().into_bytes()),
        }
    }

    /// Multipart POST carrying every parameter as a text part plus `upload`.
    pub fn multipart(url: &str, params: &Params, upload: &FileUpload) -> Self {
        let boundary = format!("chirp-{}", Uuid::new_v4().simple());
        Self::multipart_with_boundary(url, params, upload, &boundary)
    }

    pub(crate) fn multipart_with_boundary(
        url: &str,
        params: &Params,
        upload: &FileUpload,
        boundary: &str,
    ) -> Self {
        let mut body = Vec::new();
        for (name, value) in params.iter() {
            body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    escape_quoted(name)
                )
                .as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(&upload.field),
                escape_quoted(&upload.file_name)
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(&upload.contents);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Self {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: vec![(
                "content-type".to_string(),
                format!("multipart/form-data; boundary={boundary}"),
            )],
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }
}

/// Percent-encode `"`, CR and LF inside a quoted `Content-Disposition`
/// parameter (RFC 7578 §4.2), so a name can never end its header line.
fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '"' => escaped.push_str("%22"),
            '\r' => escaped.push_str("%0D"),
            '\n' => escaped.push_str("%0A"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// An HTTP response described as plain data.
///
/// Returned by a `Session`, then handed to a response shape for mapping.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Params {
        [("list_id", "42"), ("count", "200")].into_iter().collect()
    }

    #[test]
    fn get_appends_query_string() {
        let req = HttpRequest::get("https://api.example.com/1.1/lists/statuses.json", &params());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "https://api.example.com/1.1/lists/statuses.json?count=200&list_id=42"
        );
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn get_without_params_leaves_url_alone() {
        let req = HttpRequest::get("https://api.example.com/1.1/users/suggestions.json", &Params::new());
        assert_eq!(req.url, "https://api.example.com/1.1/users/suggestions.json");
    }

    #[test]
    fn get_extends_an_existing_query() {
        let req = HttpRequest::get("http://localhost/x.json?a=1", &params());
        assert_eq!(req.url, "http://localhost/x.json?a=1&count=200&list_id=42");
    }

    #[test]
    fn form_encodes_body() {
        let req = HttpRequest::form("http://localhost/lists/create.json", &params());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost/lists/create.json");
        assert_eq!(
            req.headers,
            vec![(
                "content-type".to_string(),
                "application/x-www-form-urlencoded".to_string()
            )]
        );
        assert_eq!(req.body.as_deref(), Some(&b"count=200&list_id=42"[..]));
    }

    #[test]
    fn multipart_contains_text_parts_and_file() {
        let upload = FileUpload {
            file_name: "avatar.png".to_string(),
            contents: vec![0x89, b'P', b'N', b'G'],
            field: "image".to_string(),
        };
        let mut params = Params::new();
        params.insert("skip_status", "true");
        let req = HttpRequest::multipart_with_boundary("http://localhost/up", &params, &upload, "XYZ");

        assert_eq!(
            req.headers[0].1,
            "multipart/form-data; boundary=XYZ"
        );
        let mut expected = b"--XYZ\r\nContent-Disposition: form-data; name=\"skip_status\"\r\n\r\ntrue\r\n--XYZ\r\nContent-Disposition: form-data; name=\"image\"; filename=\"avatar.png\"\r\nContent-Type: application/octet-stream\r\n\r\n".to_vec();
        expected.extend_from_slice(&[0x89, b'P', b'N', b'G']);
        expected.extend_from_slice(b"\r\n--XYZ--\r\n");
        assert_eq!(req.body.unwrap(), expected);
    }

    #[test]
    fn multipart_file_name_cannot_add_header_lines() {
        let upload = FileUpload {
            file_name: "a.png\"\r\nContent-Type: text/html\r\nX-Injected: yes\r\n\r\nevil\r\n--"
                .to_string(),
            contents: b"data".to_vec(),
            field: "image\"; x=\"y".to_string(),
        };
        let req = HttpRequest::multipart_with_boundary("http://localhost/up", &Params::new(), &upload, "XYZ");
        let body = String::from_utf8(req.body.unwrap()).unwrap();

        assert!(!body.contains("\r\nX-Injected: yes\r\n"));
        assert!(body.contains(
            "name=\"image%22; x=%22y\"; filename=\"a.png%22%0D%0AContent-Type: text/html%0D%0AX-Injected: yes%0D%0A%0D%0Aevil%0D%0A--\"\r\n"
        ));
        // One disposition line, one content type, then the file.
        assert_eq!(body.matches("\r\nContent-Type: ").count(), 1);
        assert!(body.ends_with("\r\n\r\ndata\r\n--XYZ--\r\n"));
    }

    #[test]
    fn multipart_boundaries_are_unique() {
        let upload = FileUpload {
            file_name: "a".to_string(),
            contents: Vec::new(),
            field: "image".to_string(),
        };
        let a = HttpRequest::multipart("http://localhost/up", &Params::new(), &upload);
        let b = HttpRequest::multipart("http://localhost/up", &Params::new(), &upload);
        assert_ne!(a.headers, b.headers);
    }

    #[test]
    fn success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(304, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }
}
