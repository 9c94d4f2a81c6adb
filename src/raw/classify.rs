//! Turns a raw HTTP response into either a payload or a typed error.
//!
//! The platform reports most business errors as an XML body whose `<text>`
//! element carries a human-readable English sentence. Classification is by
//! substring match on that sentence, with the pagination counts extracted
//! positionally. All wording-coupled parsing lives in this module so a
//! change upstream requires a one-place fix.

use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use super::error::RequestError;
use super::RawResponse;

pub(crate) fn classify(response: reqwest::blocking::Response) -> Result<RawResponse, RequestError> {
    let url = response.url().to_string();
    let status = response.status();
    let is_xml = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("xml"));
    let status_error = response.error_for_status_ref().err();
    let body = response.text().map_err(|source| RequestError::Transport {
        url: url.clone(),
        source,
    })?;

    if let Some(source) = status_error {
        if let Some(message) = message_text(&body) {
            if let Some(classified) = classify_message(&message) {
                return Err(classified);
            }
        }
        return Err(classify_status(status, url, source));
    }

    // Some "no data" replies come back as XML with a 200.
    if is_xml {
        if let Some(message) = message_text(&body) {
            if let Some(classified) = classify_message(&message) {
                return Err(classified);
            }
        }
    }

    Ok(RawResponse { body, url })
}

fn classify_status(status: StatusCode, url: String, source: reqwest::Error) -> RequestError {
    match status.as_u16() {
        401 => RequestError::Unauthorized,
        404 => RequestError::NotFound(url),
        429 => RequestError::RateLimited,
        // The platform answers 500 both when it is down and when no rows match.
        500 => RequestError::NoMatchingData,
        502 => RequestError::BadGateway,
        504 => RequestError::GatewayTimeout,
        _ => RequestError::Status {
            url,
            status,
            source,
        },
    }
}

/// Classifies the platform's human-readable error sentence.
pub(crate) fn classify_message(message: &str) -> Option<RequestError> {
    if message.contains("No matching data found") {
        return Some(RequestError::NoMatchingData);
    }
    if message.contains("exceeds allowed limit") {
        let (requested, allowed) = pagination_counts(message);
        return Some(RequestError::PaginationLimit { requested, allowed });
    }
    if message.contains("not a valid business parameter")
        || message.contains("invalid parameter")
    {
        return Some(RequestError::InvalidParameter(message.to_string()));
    }
    if message.contains("is not valid for") {
        return Some(RequestError::InvalidType(message.to_string()));
    }
    None
}

/// Positional extraction from the fixed upstream wording, e.g.
/// "The amount of requested data exceeds allowed limit.
/// Requested: 500 elements, allowed: 250 elements".
fn pagination_counts(message: &str) -> (u64, u64) {
    let words: Vec<&str> = message.split_whitespace().collect();
    let number_from_end = |offset: usize| {
        words
            .len()
            .checked_sub(offset)
            .and_then(|i| words.get(i))
            .and_then(|word| {
                word.trim_matches(|c: char| !c.is_ascii_digit())
                    .parse()
                    .ok()
            })
            .unwrap_or(0)
    };
    (number_from_end(5), number_from_end(2))
}

/// The content of the first `<text>` element, if the body is XML at all.
pub(crate) fn message_text(body: &str) -> Option<String> {
    if !body.trim_start().starts_with('<') {
        return None;
    }
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);
    let mut inside_text = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.local_name().as_ref() == b"text" => {
                inside_text = true;
            }
            Ok(Event::Text(text)) if inside_text => {
                return text.unescape().ok().map(|t| t.into_owned());
            }
            Ok(Event::End(element)) if element.local_name().as_ref() == b"text" => {
                inside_text = false;
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGINATION_BODY: &str = "<error>\
        <code>PAGINATION</code>\
        <text>The amount of requested data exceeds allowed limit. \
        Requested: 500 elements, allowed: 250 elements</text>\
        </error>";

    #[test]
    fn extracts_the_text_element() {
        assert_eq!(
            message_text("<fault><text>No matching data found</text></fault>"),
            Some("No matching data found".to_string())
        );
        assert_eq!(message_text("{\"meta\": {}}"), None);
        assert_eq!(message_text("<fault><code>X</code></fault>"), None);
    }

    #[test]
    fn classifies_no_matching_data() {
        let message = message_text("<f><text>No matching data found</text></f>").unwrap();
        assert!(matches!(
            classify_message(&message),
            Some(RequestError::NoMatchingData)
        ));
    }

    #[test]
    fn classifies_pagination_limit_with_counts() {
        let message = message_text(PAGINATION_BODY).unwrap();
        match classify_message(&message) {
            Some(RequestError::PaginationLimit { requested, allowed }) => {
                assert_eq!(requested, 500);
                assert_eq!(allowed, 250);
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn unrecognized_messages_stay_unclassified() {
        assert!(classify_message("something else entirely").is_none());
    }

    #[test]
    fn counts_default_to_zero_when_missing() {
        assert_eq!(pagination_counts("exceeds allowed limit"), (0, 0));
    }
}
