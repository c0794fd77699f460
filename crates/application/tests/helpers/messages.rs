use dns_intercept_application::use_cases::dns::encode_message;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::net::Ipv4Addr;

pub fn query_message(id: u16, questions: &[(&str, RecordType)]) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    for (name, record_type) in questions {
        let mut query = Query::new();
        query.set_name(Name::from_ascii(name).unwrap());
        query.set_query_type(*record_type);
        query.set_query_class(DNSClass::IN);
        message.add_query(query);
    }
    message
}

pub fn query_bytes(id: u16, questions: &[(&str, RecordType)]) -> Vec<u8> {
    encode_message(&query_message(id, questions)).unwrap()
}

/// Encoded upstream-style answer to `request` with a single A record.
pub fn a_reply(request: &[u8], address: Ipv4Addr) -> Vec<u8> {
    let request = Message::from_vec(request).unwrap();
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.add_queries(request.queries().iter().cloned());
    if let Some(query) = request.queries().first() {
        reply.add_answer(Record::from_rdata(
            query.name().clone(),
            300,
            RData::A(A(address)),
        ));
    }
    encode_message(&reply).unwrap()
}
