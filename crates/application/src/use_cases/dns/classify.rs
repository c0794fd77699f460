use dns_intercept_domain::InterceptRule;
use hickory_proto::rr::Name;
use tracing::trace;

/// Textual form of a question name as matched against the intercept domain.
///
/// Labels keep their wire (punycode) spelling. Wire names are fully
/// qualified; the root label's trailing dot is dropped so that
/// `api.test.local.` is presented as `api.test.local`.
pub fn presented_name(name: &Name) -> String {
    let mut text = name.to_ascii();
    if text.len() > 1 && text.ends_with('.') {
        text.pop();
    }
    text
}

pub fn is_intercepted(name: &str, rule: &InterceptRule) -> bool {
    let matched = rule.matches(name);
    trace!(name = %name, domain = %rule.domain(), matched, "Classified query name");
    matched
}
