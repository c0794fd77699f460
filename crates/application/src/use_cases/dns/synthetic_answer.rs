use dns_intercept_domain::{InterceptRule, INTERCEPT_TTL};
use hickory_proto::op::Query;
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record, RecordType};

/// Answer for an intercepted question, if it gets one.
///
/// Only A questions are answered, and only when the local address is IPv4.
/// Any other intercepted question is still handled locally, just with an
/// empty answer section.
pub fn synthesize_answer(query: &Query, rule: &InterceptRule) -> Option<Record> {
    if query.query_type() != RecordType::A {
        return None;
    }

    let address = rule.a_record_address()?;
    Some(Record::from_rdata(
        query.name().to_lowercase(),
        INTERCEPT_TTL,
        RData::A(A(address)),
    ))
}
