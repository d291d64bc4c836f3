//! Classification of transport outcomes into success or [`SnsError`].

use super::SnsError;

/// Classify the outcome of a single HTTP exchange.
///
/// A transport error always wins and is returned unchanged. Otherwise a
/// missing status or a status outside `200..=299` is a service failure whose
/// reason is the body text, when the body is valid UTF-8. `None` means success.
pub fn classify(
    status: Option<u16>,
    body: Option<&[u8]>,
    transport_error: Option<SnsError>,
) -> Option<SnsError> {
    if let Some(error) = transport_error {
        return Some(error);
    }

    match status {
        Some(code) if (200..=299).contains(&code) => None,
        _ => {
            let reason = body
                .and_then(|b| std::str::from_utf8(b).ok())
                .map(str::to_string);
            Some(SnsError::General { reason })
        }
    }
}
