//! BSON values encoded the way the driver writes documents.
//!
//! `insert_one` and `find` use the raw (non-human-readable) serializer, which
//! stores a `Uuid` as generic binary. `bson::to_bson` is human-readable and
//! would produce a string instead, so filter and update values built with it
//! never match stored fields. Build them with these helpers.

use mongodb::bson::{Binary, Bson, Document, spec::BinarySubtype, to_raw_document_buf};
use serde::Serialize;
use uuid::Uuid;

use crate::common::DatabaseError;

/// `id` as stored in a `Uuid` field: binary, generic subtype
pub fn uuid_bson(id: Uuid) -> Bson {
    Bson::Binary(Binary {
        subtype: BinarySubtype::Generic,
        bytes: id.as_bytes().to_vec(),
    })
}

#[derive(Serialize)]
struct Field<'a, T: ?Sized> {
    value: &'a T,
}

/// Serialize `value` with the encoding `insert_one` uses, e.g. for `$push`
pub fn stored_bson<T>(value: &T) -> Result<Bson, DatabaseError>
where
    T: Serialize + ?Sized,
{
    let raw = to_raw_document_buf(&Field { value })
        .map_err(|e| DatabaseError::Generic(format!("bson serialization failed: {}", e)))?;
    let mut document: Document = raw
        .to_document()
        .map_err(|e| DatabaseError::Generic(format!("bson conversion failed: {}", e)))?;
    document
        .remove("value")
        .ok_or_else(|| DatabaseError::Generic("serialized value is missing".to_string()))
}
