//! Mapping between `relaydns_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides are total over the 16-bit type space, so the conversion goes
//! through the numeric code and never loses a type.

use hickory_proto::rr::RecordType as HickoryRecordType;
use relaydns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        HickoryRecordType::from(record_type.to_u16())
    }

    /// Convert hickory RecordType → domain RecordType (for incoming questions)
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_u16(u16::from(hickory_type))
    }
}
