//! Storage-event decoding.
//!
//! S3 notifications carry a `Records` array; uploads are configured one
//! object per notification, so only `Records[0]` is read.

use crate::error::PipelineError;
use crate::output::StorageEventRef;
use serde_json::Value;

const BUCKET_POINTER: &str = "/Records/0/s3/bucket/name";
const KEY_POINTER: &str = "/Records/0/s3/object/key";

/// Extract bucket, key and composite id from an S3 event notification.
///
/// No defaults are applied: a missing or non-string field is an error.
pub fn decode_storage_event(event: &Value) -> Result<StorageEventRef, PipelineError> {
    let bucket = string_at(event, BUCKET_POINTER)?;
    let key = string_at(event, KEY_POINTER)?;
    Ok(StorageEventRef::new(bucket, key))
}

fn string_at<'a>(event: &'a Value, pointer: &'static str) -> Result<&'a str, PipelineError> {
    event
        .pointer(pointer)
        .and_then(Value::as_str)
        .ok_or(PipelineError::MissingEventField { pointer })
}
