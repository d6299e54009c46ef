// HTTP response utilities for the CSV file export
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};

/// Build a UTF-8 CSV download response with an attachment filename.
pub fn csv_attachment_response(filename: &str, csv: String) -> Result<Response<Body>, StatusCode> {
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/csv; charset=utf-8"),
        )
        .header(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition).map_err(|e| {
                tracing::error!("invalid export filename '{}': {}", filename, e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?,
        )
        .header(
            header::CONTENT_LENGTH,
            HeaderValue::from_str(&csv.len().to_string()).map_err(|e| {
                tracing::error!("response length header error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?,
        )
        .body(Body::from(csv))
        .map_err(|e| {
            tracing::error!("response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_attachment_headers() {
        let response =
            csv_attachment_response("previsao-primary.csv", "Periodo,Histórico\n".to_string())
                .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"previsao-primary.csv\""
        );
    }
}
