//! DTO for the recipe short link endpoint.

use serde::Serialize;

/// `{"short-link": "<base>/<prefix><slug>"}`
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_key_is_hyphenated() {
        let json = serde_json::to_value(ShortLinkResponse {
            short_link: "https://foodgram.example/s/AbCdEf".to_string(),
        })
        .unwrap();

        assert_eq!(json["short-link"], "https://foodgram.example/s/AbCdEf");
    }
}
