#![allow(dead_code)]

mod fake_upstream;

pub use fake_upstream::{FakeUpstream, FakeUpstreamMode};

use dns_intercept_application::use_cases::dns::encode_message;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::str::FromStr;

pub fn query_bytes(id: u16, name: &str, record_type: RecordType) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    encode_message(&message).unwrap()
}
