use url::Url;

pub const FEEDBACK_SUBJECT: &str = "WidgetBloom Feedback";

/// `mailto:` link with the feedback subject filled in. Opening it is up to
/// the host.
pub fn mailto_url(address: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("mailto:{address}"))?;
    url.set_query(Some(&format!("subject={FEEDBACK_SUBJECT}")));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailto_url() {
        let url = mailto_url("hello@example.com").unwrap();
        assert_eq!(url.scheme(), "mailto");
        assert_eq!(url.path(), "hello@example.com");
        assert_eq!(url.query(), Some("subject=WidgetBloom%20Feedback"));
    }
}
