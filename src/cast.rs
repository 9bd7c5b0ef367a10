//! The validation boundary: turn untrusted input into checked values.
//!
//! Both entry points are all-or-nothing and report every rejection as a
//! [`ValueError`], so callers have a single error kind to handle.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};

use crate::descriptor::Type;
use crate::error::ValueError;

/// Returns `value` unchanged if it is a member of `ty`.
pub fn from_value(value: Value, ty: &Type) -> Result<Value, ValueError> {
    if ty.is_member(&value) {
        trace!(expected = %ty, "value accepted");
        Ok(value)
    } else {
        let expected = ty.name();
        debug!(%expected, kind = "mismatch", "value rejected");
        Err(ValueError::mismatch(expected, value))
    }
}

/// Parses `text` as JSON and casts the result with [`from_value`].
///
/// Text that is not well-formed JSON is reported as a parse failure
/// carrying the raw text. So is JSON nested deeper than `serde_json`'s
/// recursion limit (128 levels), with its own message.
pub fn from_serialized_text(text: &str, ty: &Type) -> Result<Value, ValueError> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, kind = "parse", "serialized input rejected");
            // serde_json has no public error code for the recursion limit
            if e.to_string().starts_with("recursion limit exceeded") {
                return Err(ValueError::too_deep(text));
            }
            return Err(ValueError::parse(text));
        }
    };
    from_value(value, ty)
}

/// Casts `value` with [`from_value`] and deserializes the accepted value
/// into `T`.
pub fn from_value_as<T: DeserializeOwned>(value: Value, ty: &Type) -> Result<T, ValueError> {
    let value = from_value(value, ty)?;
    // keep a copy for the error, from_value consumes its input
    let kept = value.clone();
    serde_json::from_value(value).map_err(|e| {
        let target = std::any::type_name::<T>();
        debug!(%target, error = %e, kind = "decode", "accepted value did not deserialize");
        ValueError::decode(target, e.to_string(), kept)
    })
}
