use axum::{
    extract::{FromRequest, Multipart},
    http::Request,
};

use crate::endpoints;

/// Builds an upload form. Each part is `(field name, file name, content)`.
pub(crate) async fn must_make_multipart(parts: &[(&str, &str, &str)]) -> Multipart {
    let boundary = "MY_BOUNDARY123456789";
    let boundary_start = format!("--{boundary}");
    let boundary_end = format!("--{boundary}--");

    let mut lines: Vec<String> = Vec::new();

    for (name, file_name, content) in parts {
        lines.push(boundary_start.clone());
        lines.push(format!(
            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\""
        ));
        lines.push("Content-Type: text/xml".to_owned());
        lines.push("".to_owned());
        lines.push((*content).to_owned());
    }

    lines.push(boundary_end);

    let data = lines.join("\r\n").into_bytes();

    let request = Request::builder()
        .method("POST")
        .uri(endpoints::DASHBOARD_UPLOAD)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(data.into())
        .unwrap();

    Multipart::from_request(request, &{}).await.unwrap()
}
